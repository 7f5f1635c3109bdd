//! Process domain models.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::error::ComexError;

/// Pipeline stage (kanban column), in pipeline order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Stage {
    AwaitingShipment,
    InTransit,
    AwaitingRegistration,
    RegisterDeclaration,
    AwaitingChannel,
    AwaitingClosure,
    Closed,
}

impl Stage {
    /// Every stage, in pipeline order.
    pub const ALL: [Stage; 7] = [
        Self::AwaitingShipment,
        Self::InTransit,
        Self::AwaitingRegistration,
        Self::RegisterDeclaration,
        Self::AwaitingChannel,
        Self::AwaitingClosure,
        Self::Closed,
    ];

    /// Stage assigned to new records.
    pub fn first() -> Self {
        Self::AwaitingShipment
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::AwaitingShipment => "awaiting-shipment",
            Self::InTransit => "in-transit",
            Self::AwaitingRegistration => "awaiting-registration",
            Self::RegisterDeclaration => "register-declaration",
            Self::AwaitingChannel => "awaiting-channel",
            Self::AwaitingClosure => "awaiting-closure",
            Self::Closed => "closed",
        }
    }

    /// Column title.
    pub fn title(&self) -> &'static str {
        match self {
            Self::AwaitingShipment => "Awaiting Shipment",
            Self::InTransit => "In Transit",
            Self::AwaitingRegistration => "Awaiting Registration",
            Self::RegisterDeclaration => "Register Declaration",
            Self::AwaitingChannel => "Awaiting Channel",
            Self::AwaitingClosure => "Awaiting Closure",
            Self::Closed => "Closed",
        }
    }

    /// Records in this stage count as active. Only `Closed` is inactive.
    pub fn is_active(&self) -> bool {
        *self != Self::Closed
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Stage {
    type Err = ComexError;

    /// Accepts the current identifiers and those written by the legacy
    /// browser build.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "awaiting-shipment" | "aguardando-embarque" => Ok(Self::AwaitingShipment),
            "in-transit" | "em-transito" => Ok(Self::InTransit),
            "awaiting-registration" | "aguardando-registro" => Ok(Self::AwaitingRegistration),
            "register-declaration" | "registrar-di" => Ok(Self::RegisterDeclaration),
            "awaiting-channel" | "aguardando-canal" => Ok(Self::AwaitingChannel),
            "awaiting-closure" | "aguardando-fechamento" => Ok(Self::AwaitingClosure),
            "closed" | "encerrados" => Ok(Self::Closed),
            _ => Err(ComexError::UnknownStage(s.to_string())),
        }
    }
}

/// Whether a process is an import or an export.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    #[default]
    Import,
    Export,
}

impl Direction {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Import => "import",
            Self::Export => "export",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Direction {
    type Err = ComexError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "import" | "importacao" => Ok(Self::Import),
            "export" | "exportacao" => Ok(Self::Export),
            _ => Err(ComexError::validation(format!(
                "Invalid direction '{}'. Valid directions: import, export",
                s
            ))),
        }
    }
}

/// Transport mode.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransportMode {
    #[default]
    Sea,
    Air,
    Road,
}

impl TransportMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Sea => "sea",
            Self::Air => "air",
            Self::Road => "road",
        }
    }
}

impl fmt::Display for TransportMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TransportMode {
    type Err = ComexError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "sea" | "maritimo" => Ok(Self::Sea),
            "air" | "aereo" => Ok(Self::Air),
            "road" | "rodoviario" => Ok(Self::Road),
            _ => Err(ComexError::validation(format!(
                "Invalid transport mode '{}'. Valid modes: sea, air, road",
                s
            ))),
        }
    }
}

/// A customs process tracked on the board.
///
/// Always fully populated; build one through
/// [`normalize`](crate::process::normalize::normalize).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Process {
    pub id: String,
    pub reference: String,
    pub direction: Direction,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub importer: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exporter: Option<String>,
    pub acquirer: String,
    pub supplier: String,
    pub client_reference: String,
    pub transport: TransportMode,
    pub stage: Stage,
    pub created_at: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub freight_agent: Option<String>,
    pub active: bool,
    pub order: i64,
}

impl Process {
    /// Importer for imports, exporter for exports.
    pub fn counterpart(&self) -> &str {
        match self.direction {
            Direction::Import => self.importer.as_deref().unwrap_or_default(),
            Direction::Export => self.exporter.as_deref().unwrap_or_default(),
        }
    }

    /// Set the counterpart field matching the current direction and clear
    /// the other one.
    pub fn set_counterpart(&mut self, name: impl Into<String>) {
        let name = name.into();
        match self.direction {
            Direction::Import => {
                self.importer = Some(name);
                self.exporter = None;
            }
            Direction::Export => {
                self.exporter = Some(name);
                self.importer = None;
            }
        }
    }
}

/// A process as found in storage: any field may be missing.
///
/// Field aliases accept documents written by the legacy browser build.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RawProcess {
    pub id: Option<String>,
    #[serde(alias = "referencia")]
    pub reference: Option<String>,
    #[serde(alias = "tipo")]
    pub direction: Option<String>,
    #[serde(alias = "importador")]
    pub importer: Option<String>,
    #[serde(alias = "exportador")]
    pub exporter: Option<String>,
    #[serde(alias = "adquirente")]
    pub acquirer: Option<String>,
    #[serde(alias = "fornecedor")]
    pub supplier: Option<String>,
    #[serde(alias = "referenciaCliente")]
    pub client_reference: Option<String>,
    #[serde(alias = "modal")]
    pub transport: Option<String>,
    #[serde(alias = "status")]
    pub stage: Option<String>,
    #[serde(alias = "dataCriacao")]
    pub created_at: Option<String>,
    #[serde(alias = "agenteCargas")]
    pub freight_agent: Option<String>,
    #[serde(alias = "isActive", deserialize_with = "lenient_flag")]
    pub active: Option<bool>,
    #[serde(alias = "ordem", deserialize_with = "lenient_order_key")]
    pub order: Option<i64>,
}

/// Order keys may be stored as any JSON number (legacy timestamps can be
/// fractional) or a numeric string. Fractions round to the nearest integer.
/// Anything else counts as missing.
fn lenient_order_key<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.as_ref().and_then(order_key_from_json))
}

fn order_key_from_json(value: &Value) -> Option<i64> {
    let float = match value {
        Value::Number(n) => match n.as_i64() {
            Some(key) => return Some(key),
            None => n.as_f64(),
        },
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }?;
    float.is_finite().then(|| float.round() as i64)
}

/// The active flag is re-derived from the stage, so a malformed one is
/// simply dropped.
fn lenient_flag<'de, D>(deserializer: D) -> Result<Option<bool>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.and_then(|v| v.as_bool()))
}

impl From<Process> for RawProcess {
    fn from(p: Process) -> Self {
        Self {
            id: Some(p.id),
            reference: Some(p.reference),
            direction: Some(p.direction.as_str().to_string()),
            importer: p.importer,
            exporter: p.exporter,
            acquirer: Some(p.acquirer),
            supplier: Some(p.supplier),
            client_reference: Some(p.client_reference),
            transport: Some(p.transport.as_str().to_string()),
            stage: Some(p.stage.as_str().to_string()),
            created_at: Some(p.created_at),
            freight_agent: p.freight_agent,
            active: Some(p.active),
            order: Some(p.order),
        }
    }
}

/// Fields supplied when creating a process.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewProcess {
    pub reference: String,
    pub direction: Direction,
    /// Importer or exporter, depending on `direction`.
    pub counterpart: String,
    pub acquirer: String,
    pub supplier: String,
    pub client_reference: String,
    pub transport: TransportMode,
    /// Defaults to the first pipeline stage.
    pub stage: Option<Stage>,
    pub freight_agent: Option<String>,
}

impl From<NewProcess> for RawProcess {
    fn from(n: NewProcess) -> Self {
        let (importer, exporter) = match n.direction {
            Direction::Import => (Some(n.counterpart), None),
            Direction::Export => (None, Some(n.counterpart)),
        };
        Self {
            id: None,
            reference: Some(n.reference),
            direction: Some(n.direction.as_str().to_string()),
            importer,
            exporter,
            acquirer: Some(n.acquirer),
            supplier: Some(n.supplier),
            client_reference: Some(n.client_reference),
            transport: Some(n.transport.as_str().to_string()),
            stage: n.stage.map(|s| s.as_str().to_string()),
            created_at: None,
            freight_agent: n.freight_agent,
            active: None,
            order: None,
        }
    }
}
