use serde::{Deserialize, Serialize};

/// How `min`, `max` and `sum` report an empty sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EmptyAggregate {
    /// Report "no value" (`Ok(None)`).
    #[default]
    Nil,
    /// Report the raw `0` sentinel, which collides with a stored zero.
    Zero,
}

/// Store behaviour switches.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    pub empty_aggregate: EmptyAggregate,
}
