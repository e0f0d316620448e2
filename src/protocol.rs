use std::collections::HashMap;

pub const BASIC_INFO: &str = "/common/basic_info";
pub const CONTROL_INFO: &str = "/aircon/get_control_info";
pub const SENSOR_INFO: &str = "/aircon/get_sensor_info";
pub const SET_CONTROL_INFO: &str = "/aircon/set_control_info";

/// Room temperature this far inside the configured threshold selects auto
/// mode when powering on; outside the band it decides cool vs heat.
const MODE_BAND_C: f64 = 2.0;

/// Parse a `key=value,key=value` response body. Keys are unique within one
/// response; tokens without `=` are skipped.
pub fn parse_response(body: &str) -> HashMap<String, String> {
    let mut vals = HashMap::new();
    for item in body.split(',') {
        if let Some((key, value)) = item.split_once('=') {
            vals.insert(key.to_string(), value.to_string());
        }
    }
    vals
}

/// Rewrite a comma-separated control-info body into an `&`-joined query
/// string, substituting the values of the targeted keys in place. Every
/// other token passes through byte-for-byte in its original position; keys
/// absent from the body are not added.
pub fn rewrite_query(body: &str, changes: &[(&str, &str)]) -> String {
    let tokens: Vec<String> = body
        .split(',')
        .map(|token| {
            if let Some((key, _)) = token.split_once('=')
                && let Some((_, new_value)) = changes.iter().find(|(k, _)| *k == key)
            {
                format!("{key}={new_value}")
            } else {
                token.to_string()
            }
        })
        .collect();
    tokens.join("&")
}

/// Device mode code to use when powering on, derived from the live room
/// temperature. Inside the band around the threshold the unit runs in auto;
/// the "above" case is checked before "below" where the bands overlap.
pub fn mode_for_room_temp(htemp: Option<f64>, threshold: f64) -> &'static str {
    let Some(t) = htemp else {
        return "0";
    };
    if t > threshold - MODE_BAND_C && t < threshold + MODE_BAND_C {
        "1"
    } else if t > threshold - MODE_BAND_C {
        "3"
    } else if t < threshold + MODE_BAND_C {
        "4"
    } else {
        "0"
    }
}

/// Check a set_control_info acknowledgment. `Err` carries the device's
/// `ret` value (empty if the field is missing).
pub fn write_ack(body: &str) -> std::result::Result<(), String> {
    let vals = parse_response(body);
    match vals.get("ret").map(String::as_str) {
        Some("OK") => Ok(()),
        Some(ret) => Err(ret.to_string()),
        None => Err(String::new()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_basic() {
        let vals = parse_response("a=1,b=2");
        assert_eq!(vals.get("a").unwrap(), "1");
        assert_eq!(vals.get("b").unwrap(), "2");
        assert_eq!(vals.len(), 2);
    }

    #[test]
    fn parse_empty() {
        assert!(parse_response("").is_empty());
    }

    #[test]
    fn parse_skips_bare_tokens() {
        let vals = parse_response("ret=OK,garbage,adv=");
        assert_eq!(vals.get("ret").unwrap(), "OK");
        assert_eq!(vals.get("adv").unwrap(), "");
        assert_eq!(vals.len(), 2);
    }

    #[test]
    fn rewrite_preserves_untouched_tokens() {
        let body = "ret=OK,pow=1,mode=3,adv=,stemp=25.0,shum=0,dt3=25.0";
        let query = rewrite_query(body, &[("pow", "0"), ("mode", "4")]);
        assert_eq!(query, "ret=OK&pow=0&mode=4&adv=&stemp=25.0&shum=0&dt3=25.0");
    }

    #[test]
    fn rewrite_handles_symbolic_mode_values() {
        // Mode can be a multi-digit or symbolic code; the substitution is
        // keyed on the token's key, not its value shape.
        let query = rewrite_query("pow=1,mode=HUM,stemp=M", &[("mode", "3")]);
        assert_eq!(query, "pow=1&mode=3&stemp=M");
    }

    #[test]
    fn rewrite_skips_absent_keys() {
        let query = rewrite_query("pow=1,mode=3", &[("dt3", "22")]);
        assert_eq!(query, "pow=1&mode=3");
    }

    #[test]
    fn rewrite_empty_body() {
        assert_eq!(rewrite_query("", &[("pow", "1")]), "");
    }

    #[test]
    fn mode_above_band_is_cool() {
        assert_eq!(mode_for_room_temp(Some(28.0), 26.0), "3");
    }

    #[test]
    fn mode_below_band_is_heat() {
        assert_eq!(mode_for_room_temp(Some(20.0), 26.0), "4");
    }

    #[test]
    fn mode_inside_band_is_auto() {
        assert_eq!(mode_for_room_temp(Some(25.0), 25.0), "1");
        assert_eq!(mode_for_room_temp(Some(26.5), 25.0), "1");
    }

    #[test]
    fn mode_band_edges_are_exclusive() {
        // Exactly threshold-2 falls out of the band and into the heat
        // branch; exactly threshold+2 into the cool branch.
        assert_eq!(mode_for_room_temp(Some(23.0), 25.0), "4");
        assert_eq!(mode_for_room_temp(Some(27.0), 25.0), "3");
    }

    #[test]
    fn mode_unknown_temperature_falls_back() {
        assert_eq!(mode_for_room_temp(None, 25.0), "0");
    }

    #[test]
    fn write_ack_ok() {
        assert!(write_ack("ret=OK,pow=1").is_ok());
    }

    #[test]
    fn write_ack_carries_ret_value() {
        assert_eq!(write_ack("ret=PARAM NG").unwrap_err(), "PARAM NG");
        assert_eq!(write_ack("pow=1").unwrap_err(), "");
    }
}
