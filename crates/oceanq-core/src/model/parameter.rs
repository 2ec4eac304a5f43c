use serde::{Deserialize, Serialize};

pub type ParameterId = i64;

///
/// Parameter
///
/// A named measured quantity. `name` is the stable identity key;
/// `standard_name` is the optional controlled-vocabulary name.
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct Parameter {
    pub id: ParameterId,
    pub name: String,
    pub standard_name: Option<String>,
    pub units: Option<String>,
}
