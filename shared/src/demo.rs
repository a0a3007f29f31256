//! Demo data seed (`POST /init-demo-data`)
//!
//! One account per role, a small Colombian menu and a floor of tables. The
//! seed is planned against what already exists so running it twice creates
//! nothing the second time.

use crate::models::{ProductCreate, Role};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Password shared by every demo account
pub const DEMO_PASSWORD: &str = "demo123";

/// Demo login shown on the sign-in screen
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DemoAccount {
    pub email: String,
    pub password: String,
    pub name: String,
    pub role: Role,
}

/// Demo table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DemoTable {
    pub number: u32,
    pub capacity: u32,
}

fn account(email: &str, name: &str, role: Role) -> DemoAccount {
    DemoAccount {
        email: email.into(),
        password: DEMO_PASSWORD.into(),
        name: name.into(),
        role,
    }
}

pub fn demo_accounts() -> Vec<DemoAccount> {
    vec![
        account("admin@sirest.co", "Administrador Demo", Role::Admin),
        account("mesero@sirest.co", "Mesero Demo", Role::Waiter),
        account("cajero@sirest.co", "Cajero Demo", Role::Cashier),
        account("cocinero@sirest.co", "Cocinero Demo", Role::Cook),
        account("cliente@sirest.co", "Cliente Demo", Role::Client),
    ]
}

fn product(name: &str, category: &str, price: f64, stock: i64, min_stock: i64) -> ProductCreate {
    ProductCreate {
        name: name.into(),
        category: category.into(),
        price,
        stock,
        min_stock,
        description: None,
    }
}

/// Categories: Entradas, Platos Fuertes, Postres, Bebidas
pub fn demo_products() -> Vec<ProductCreate> {
    vec![
        // Entradas
        product("Empanadas x3", "Entradas", 9_000.0, 40, 10),
        product("Patacones con hogao", "Entradas", 11_000.0, 30, 8),
        product("Sopa de tortilla", "Entradas", 12_000.0, 20, 5),
        // Platos Fuertes
        product("Ajiaco santafereño", "Platos Fuertes", 28_000.0, 25, 5),
        product("Bandeja paisa", "Platos Fuertes", 34_000.0, 20, 5),
        product("Sancocho de gallina", "Platos Fuertes", 30_000.0, 15, 5),
        product("Mojarra frita", "Platos Fuertes", 36_000.0, 8, 10),
        // Postres
        product("Tres leches", "Postres", 10_000.0, 12, 4),
        product("Arroz con leche", "Postres", 8_000.0, 0, 4),
        // Bebidas
        product("Limonada de coco", "Bebidas", 9_500.0, 50, 10),
        product("Jugo natural", "Bebidas", 7_000.0, 60, 10),
        product("Café tinto", "Bebidas", 3_500.0, 100, 20),
    ]
}

pub fn demo_tables() -> Vec<DemoTable> {
    (1..=10)
        .map(|number| DemoTable {
            number,
            capacity: if number <= 6 { 4 } else { 6 },
        })
        .collect()
}

/// What the backend already holds
#[derive(Debug, Clone, Default)]
pub struct ExistingData {
    pub user_emails: HashSet<String>,
    pub product_names: HashSet<String>,
    pub table_numbers: HashSet<u32>,
}

impl ExistingData {
    pub fn has_all_demo_accounts(&self) -> bool {
        demo_accounts()
            .iter()
            .all(|a| self.user_emails.contains(&a.email.to_lowercase()))
    }
}

/// Rows still missing
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SeedPlan {
    pub accounts: Vec<DemoAccount>,
    pub products: Vec<ProductCreate>,
    pub tables: Vec<DemoTable>,
}

impl SeedPlan {
    pub fn is_empty(&self) -> bool {
        self.accounts.is_empty() && self.products.is_empty() && self.tables.is_empty()
    }
}

/// Plan the seed against existing data. Emails compare case-insensitively.
///
/// When every demo account exists the catalog is assumed seeded as well and
/// nothing is planned, even if products were deleted since.
pub fn plan_seed(existing: &ExistingData) -> SeedPlan {
    if existing.has_all_demo_accounts() {
        return SeedPlan::default();
    }
    SeedPlan {
        accounts: demo_accounts()
            .into_iter()
            .filter(|a| !existing.user_emails.contains(&a.email.to_lowercase()))
            .collect(),
        products: demo_products()
            .into_iter()
            .filter(|p| !existing.product_names.contains(&p.name))
            .collect(),
        tables: demo_tables()
            .into_iter()
            .filter(|t| !existing.table_numbers.contains(&t.number))
            .collect(),
    }
}

/// Response of `/init-demo-data`; same shape whether or not anything was created
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DemoSeedResult {
    #[serde(default)]
    pub users_created: u32,
    #[serde(default)]
    pub products_created: u32,
    #[serde(default)]
    pub tables_created: u32,
    /// Logins available after the seed
    #[serde(default)]
    pub accounts: Vec<DemoAccount>,
}

impl DemoSeedResult {
    pub fn from_plan(plan: &SeedPlan) -> Self {
        Self {
            users_created: plan.accounts.len() as u32,
            products_created: plan.products.len() as u32,
            tables_created: plan.tables.len() as u32,
            accounts: demo_accounts(),
        }
    }

    pub fn created_anything(&self) -> bool {
        self.users_created + self.products_created + self.tables_created > 0
    }
}
