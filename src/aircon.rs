use std::collections::HashMap;
use std::time::Duration;

use tracing::{debug, warn};

use crate::client::DeviceClient;
use crate::protocol::{
    mode_for_room_temp, parse_response, rewrite_query, write_ack, BASIC_INFO, CONTROL_INFO,
    SENSOR_INFO, SET_CONTROL_INFO,
};
use crate::types::*;
use crate::{Error, Result};

/// Room temperature pivot for choosing cool vs heat vs auto on power-on.
pub const DEFAULT_THRESHOLD_C: f64 = 25.0;

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

pub struct AirconBuilder {
    host: String,
    name: String,
    cooling_heating_threshold: f64,
    timeout: Duration,
}

impl AirconBuilder {
    pub fn new(host: impl Into<String>) -> Self {
        Self {
            host: host.into(),
            name: "aircon".to_string(),
            cooling_heating_threshold: DEFAULT_THRESHOLD_C,
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Display name for the unit.
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Pivot temperature for the power-on mode choice. Default 25 °C.
    pub fn cooling_heating_threshold(mut self, celsius: f64) -> Self {
        self.cooling_heating_threshold = celsius;
        self
    }

    /// Per-request timeout. The device protocol has no acknowledgment for a
    /// request that never completes, so every fetch is bounded.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn build(self) -> Aircon {
        Aircon {
            device: DeviceClient::new(&self.host, self.timeout),
            name: self.name,
            cooling_heating_threshold: self.cooling_heating_threshold,
        }
    }
}

/// Translates between the host's semantic state model and the device's
/// `key=value` query protocol. Reads serve from the short-lived cache and
/// degrade to default values on failure; writes are read-modify-write
/// against fresh control info and report device rejections.
pub struct Aircon {
    device: DeviceClient,
    name: String,
    cooling_heating_threshold: f64,
}

impl Aircon {
    pub fn builder(host: impl Into<String>) -> AirconBuilder {
        AirconBuilder::new(host)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    // -- Reads --

    /// Power state, from basic info.
    pub async fn active(&mut self) -> Active {
        let vals = self.read(BASIC_INFO).await;
        if vals.get("pow").map(String::as_str) == Some("1") {
            Active::Active
        } else {
            Active::Inactive
        }
    }

    /// What the unit is doing right now.
    pub async fn current_state(&mut self) -> CurrentHeaterCoolerState {
        let vals = self.read(CONTROL_INFO).await;
        if vals.get("pow").map(String::as_str) != Some("1") {
            return CurrentHeaterCoolerState::Inactive;
        }
        CurrentHeaterCoolerState::from_mode_code(vals.get("mode").map(String::as_str).unwrap_or(""))
    }

    /// Configured operating mode, reduced to the host vocabulary.
    pub async fn target_state(&mut self) -> TargetHeaterCoolerState {
        let vals = self.read(CONTROL_INFO).await;
        if vals.get("pow").map(String::as_str) != Some("1") {
            return TargetHeaterCoolerState::Auto;
        }
        TargetHeaterCoolerState::from_mode_code(vals.get("mode").map(String::as_str).unwrap_or(""))
    }

    /// Room temperature in °C, from sensor info. 0.0 if unreadable.
    pub async fn current_temperature(&mut self) -> f64 {
        let vals = self.read(SENSOR_INFO).await;
        float_field(&vals, "htemp")
    }

    /// Set-point temperature in °C. The device reports `stemp=M` or `--` in
    /// some modes; those read as 0.0.
    pub async fn threshold_temperature(&mut self) -> f64 {
        let vals = self.read(CONTROL_INFO).await;
        float_field(&vals, "stemp")
    }

    /// Relative humidity in %, from sensor info. 0.0 if unreadable.
    pub async fn current_relative_humidity(&mut self) -> f64 {
        let vals = self.read(SENSOR_INFO).await;
        float_field(&vals, "hhum")
    }

    // -- Writes --

    /// Power the unit on or off. On power-on the operating mode is chosen
    /// from the live room temperature against the configured threshold;
    /// the mode key is rewritten on power-off too, as the adapter firmware
    /// expects a complete control query.
    pub async fn set_active(&mut self, active: Active) -> Result<()> {
        let control = self.device.get(CONTROL_INFO, false).await?;
        let sensor = self.device.get(SENSOR_INFO, false).await?;

        let htemp = parse_response(&sensor)
            .get("htemp")
            .and_then(|v| v.parse().ok());
        let mode = mode_for_room_temp(htemp, self.cooling_heating_threshold);
        debug!(?active, mode, "setting power state");

        self.write_control(&control, &[("pow", active.as_pow()), ("mode", mode)])
            .await
    }

    /// Switch operating mode. Forces power on as a side effect of reusing
    /// the control rewrite path (a device-protocol quirk).
    pub async fn set_target_state(&mut self, state: TargetHeaterCoolerState) -> Result<()> {
        let control = self.device.get(CONTROL_INFO, false).await?;
        self.write_control(&control, &[("pow", "1"), ("mode", state.as_mode_code())])
            .await
    }

    /// Set the cooling set-point. Forces `pow=1,mode=3` (same quirk).
    pub async fn set_cooling_temperature(&mut self, celsius: f64) -> Result<()> {
        let control = self.device.get(CONTROL_INFO, false).await?;
        let temp = celsius.to_string();
        self.write_control(
            &control,
            &[("pow", "1"), ("mode", "3"), ("stemp", &temp), ("dt3", &temp)],
        )
        .await
    }

    /// Set the heating set-point. Forces `pow=1,mode=4` (same quirk).
    pub async fn set_heating_temperature(&mut self, celsius: f64) -> Result<()> {
        let control = self.device.get(CONTROL_INFO, false).await?;
        let temp = celsius.to_string();
        self.write_control(
            &control,
            &[("pow", "1"), ("mode", "4"), ("stemp", &temp), ("dt4", &temp)],
        )
        .await
    }

    /// The characteristics this unit exposes, with the constraints the host
    /// should register for the writable set-points.
    pub fn capabilities(&self) -> Vec<Capability> {
        vec![
            Capability {
                characteristic: Characteristic::Active,
                readable: true,
                writable: true,
                range: None,
            },
            Capability {
                characteristic: Characteristic::CurrentHeaterCoolerState,
                readable: true,
                writable: false,
                range: None,
            },
            Capability {
                characteristic: Characteristic::TargetHeaterCoolerState,
                readable: true,
                writable: true,
                range: None,
            },
            Capability {
                characteristic: Characteristic::CurrentTemperature,
                readable: true,
                writable: false,
                range: None,
            },
            Capability {
                characteristic: Characteristic::CoolingThresholdTemperature,
                readable: true,
                writable: true,
                range: Some(COOLING_THRESHOLD_RANGE),
            },
            Capability {
                characteristic: Characteristic::HeatingThresholdTemperature,
                readable: true,
                writable: true,
                range: Some(HEATING_THRESHOLD_RANGE),
            },
            Capability {
                characteristic: Characteristic::CurrentRelativeHumidity,
                readable: true,
                writable: false,
                range: None,
            },
        ]
    }

    // -- Helpers --

    /// Cached read. A failed fetch reports default values to the host
    /// rather than an error, so this degrades to an empty mapping.
    async fn read(&mut self, path: &str) -> HashMap<String, String> {
        match self.device.get(path, true).await {
            Ok(body) => parse_response(&body),
            Err(e) => {
                warn!(path, error = %e, "read failed, reporting defaults");
                HashMap::new()
            }
        }
    }

    /// Rewrite the targeted keys of a control-info body and issue the
    /// write, uncached. Untouched keys pass through unchanged so the query
    /// always carries the device's full configuration.
    async fn write_control(&mut self, control_body: &str, changes: &[(&str, &str)]) -> Result<()> {
        let query = rewrite_query(control_body, changes);
        let set_path = format!("{SET_CONTROL_INFO}?{query}");
        let body = self.device.get(&set_path, false).await?;

        // Each distinct set query gets its own cache entry and is never
        // read back; drop it so the cache holds only the info paths.
        self.device.invalidate(&set_path);
        write_ack(&body).map_err(Error::WriteRejected)?;

        // The write changed power and mode; the memoized info bodies
        // predate it and would serve the old state for up to a minute.
        self.device.invalidate(BASIC_INFO);
        self.device.invalidate(CONTROL_INFO);
        Ok(())
    }
}

fn float_field(vals: &HashMap<String, String>, key: &str) -> f64 {
    vals.get(key).and_then(|v| v.parse().ok()).unwrap_or(0.0)
}
