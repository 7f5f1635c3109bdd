//! Client registry models.

use serde::{Deserialize, Serialize};

use crate::ids;

pub const CLIENT_ID_PREFIX: &str = "client";
pub const SUPPLIER_ID_PREFIX: &str = "supplier";

/// A client and the suppliers registered under it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Client {
    pub id: String,
    pub name: String,
    pub tax_id: String,
    pub suppliers: Vec<Supplier>,
}

/// A supplier, scoped to the client that owns it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Supplier {
    pub id: String,
    pub name: String,
    pub client_id: String,
}

/// A client as found in storage.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RawClient {
    pub id: Option<String>,
    #[serde(alias = "nome")]
    pub name: Option<String>,
    #[serde(alias = "cnpj")]
    pub tax_id: Option<String>,
    #[serde(alias = "fornecedores")]
    pub suppliers: Option<Vec<RawSupplier>>,
}

/// A supplier as found in storage.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RawSupplier {
    pub id: Option<String>,
    #[serde(alias = "nome")]
    pub name: Option<String>,
    #[serde(alias = "clienteId")]
    pub client_id: Option<String>,
}

/// Backfill missing fields and point every supplier at its owning client.
pub fn normalize_client(raw: RawClient) -> Client {
    let id = raw
        .id
        .filter(|s| !s.trim().is_empty())
        .unwrap_or_else(|| ids::generate_id(CLIENT_ID_PREFIX));

    let suppliers = raw
        .suppliers
        .unwrap_or_default()
        .into_iter()
        .map(|s| Supplier {
            id: s
                .id
                .filter(|v| !v.trim().is_empty())
                .unwrap_or_else(|| ids::generate_id(SUPPLIER_ID_PREFIX)),
            name: s.name.unwrap_or_default(),
            client_id: id.clone(),
        })
        .collect();

    Client {
        name: raw.name.unwrap_or_default(),
        tax_id: raw.tax_id.unwrap_or_default(),
        suppliers,
        id,
    }
}
