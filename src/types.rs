use serde::Serialize;

/// Power state as seen by the automation host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Active {
    Active,
    Inactive,
}

impl Active {
    pub(crate) fn as_pow(&self) -> &'static str {
        match self {
            Active::Active => "1",
            Active::Inactive => "0",
        }
    }
}

/// What the unit is doing right now. Lossy view of the device mode code:
/// auto (0), humidify (1), dehumidify (2), fan (6) and HUM all report Idle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CurrentHeaterCoolerState {
    Inactive,
    Idle,
    Cooling,
    Heating,
}

impl CurrentHeaterCoolerState {
    pub(crate) fn from_mode_code(code: &str) -> Self {
        match code {
            "3" => CurrentHeaterCoolerState::Cooling,
            "4" => CurrentHeaterCoolerState::Heating,
            _ => CurrentHeaterCoolerState::Idle,
        }
    }
}

/// The reduced mode vocabulary the host can ask for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TargetHeaterCoolerState {
    Auto,
    Cool,
    Heat,
}

impl TargetHeaterCoolerState {
    pub(crate) fn from_mode_code(code: &str) -> Self {
        match code {
            "3" => TargetHeaterCoolerState::Cool,
            "4" => TargetHeaterCoolerState::Heat,
            _ => TargetHeaterCoolerState::Auto,
        }
    }

    pub(crate) fn as_mode_code(&self) -> &'static str {
        match self {
            TargetHeaterCoolerState::Auto => "1",
            TargetHeaterCoolerState::Cool => "3",
            TargetHeaterCoolerState::Heat => "4",
        }
    }
}

/// Host-facing characteristics exposed by the translator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Characteristic {
    Active,
    CurrentHeaterCoolerState,
    TargetHeaterCoolerState,
    CurrentTemperature,
    CoolingThresholdTemperature,
    HeatingThresholdTemperature,
    CurrentRelativeHumidity,
}

/// Valid range constraint the host registers alongside a characteristic.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ValueRange {
    pub min: f64,
    pub max: f64,
    pub step: f64,
}

pub const COOLING_THRESHOLD_RANGE: ValueRange = ValueRange {
    min: 18.0,
    max: 32.0,
    step: 1.0,
};

pub const HEATING_THRESHOLD_RANGE: ValueRange = ValueRange {
    min: 15.0,
    max: 30.0,
    step: 1.0,
};

/// One entry of the capability enumeration the host collaborator uses to
/// wire get/set operations to characteristics. The translator does not
/// enforce the range itself; the registering host does.
#[derive(Debug, Clone, Serialize)]
pub struct Capability {
    pub characteristic: Characteristic,
    pub readable: bool,
    pub writable: bool,
    pub range: Option<ValueRange>,
}
