use anyhow::{bail, Result};

use crate::register_toolbelt;

const METERS_TO_FEET: f64 = 3.28084;

#[derive(Default)]
pub struct Conversion;

register_toolbelt! {
    Conversion {
        description: "Convert values between measurement units",
        tools: {
            "convert_length" => convert_length {
                description: "Convert length between meters and feet.",
                params: [
                    "value": "number" => "The length value to convert",
                    "from_unit": "string" => "Convert from 'meters' or 'feet'",
                    "to_unit": "string" => "Convert to 'meters' or 'feet'",
                ]
            },
            "convert_temperature" => convert_temperature {
                description: "Convert temperature between Celsius, Fahrenheit, and Kelvin.",
                params: [
                    "value": "number" => "Temperature value to convert",
                    "from_unit": "string" => "Convert from 'celsius', 'fahrenheit', or 'kelvin'",
                    "to_unit": "string" => "Convert to 'celsius', 'fahrenheit', or 'kelvin'",
                ]
            }
        }
    }
}

impl Conversion {
    fn convert_length(&self, args: &serde_json::Value) -> Result<String> {
        let value = args["value"]
            .as_f64()
            .ok_or_else(|| anyhow::anyhow!("Missing 'value' argument"))?;
        let from_unit = args["from_unit"]
            .as_str()
            .ok_or_else(|| anyhow::anyhow!("Missing 'from_unit' argument"))?;
        let to_unit = args["to_unit"]
            .as_str()
            .ok_or_else(|| anyhow::anyhow!("Missing 'to_unit' argument"))?;

        Ok(length(value, from_unit, to_unit)?.to_string())
    }

    fn convert_temperature(&self, args: &serde_json::Value) -> Result<String> {
        let value = args["value"]
            .as_f64()
            .ok_or_else(|| anyhow::anyhow!("Missing 'value' argument"))?;
        let from_unit = args["from_unit"]
            .as_str()
            .ok_or_else(|| anyhow::anyhow!("Missing 'from_unit' argument"))?;
        let to_unit = args["to_unit"]
            .as_str()
            .ok_or_else(|| anyhow::anyhow!("Missing 'to_unit' argument"))?;

        Ok(temperature(value, from_unit, to_unit)?.to_string())
    }
}

pub fn length(value: f64, from_unit: &str, to_unit: &str) -> Result<f64> {
    if value < 0.0 {
        bail!("Length cannot be negative");
    }

    match (from_unit, to_unit) {
        ("meters", "meters") | ("feet", "feet") => Ok(value),
        ("meters", "feet") => Ok(round_to(value * METERS_TO_FEET, 4)),
        ("feet", "meters") => Ok(round_to(value / METERS_TO_FEET, 4)),
        _ => bail!("Unknown length unit: use 'meters' or 'feet'"),
    }
}

pub fn temperature(value: f64, from_unit: &str, to_unit: &str) -> Result<f64> {
    if from_unit == to_unit {
        return match from_unit {
            "celsius" | "fahrenheit" | "kelvin" => Ok(value),
            _ => bail!("Unknown temperature unit: use 'celsius', 'fahrenheit', or 'kelvin'"),
        };
    }

    // Pivot through Celsius
    let celsius = match from_unit {
        "fahrenheit" => (value - 32.0) * 5.0 / 9.0,
        "kelvin" => value - 273.15,
        "celsius" => value,
        _ => bail!("Unknown temperature unit: use 'celsius', 'fahrenheit', or 'kelvin'"),
    };

    let result = match to_unit {
        "fahrenheit" => celsius * 9.0 / 5.0 + 32.0,
        "kelvin" => celsius + 273.15,
        "celsius" => celsius,
        _ => bail!("Unknown temperature unit: use 'celsius', 'fahrenheit', or 'kelvin'"),
    };

    Ok(round_to(result, 2))
}

fn round_to(value: f64, places: i32) -> f64 {
    let factor = 10f64.powi(places);
    (value * factor).round() / factor
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn meters_to_feet_known_value() {
        assert_eq!(length(3.0, "meters", "feet").unwrap(), 9.8425);
    }

    #[test]
    fn length_round_trip_within_rounding_tolerance() {
        for value in [0.0, 0.5, 1.0, 1.85, 2.5, 1234.56] {
            let feet = length(value, "meters", "feet").unwrap();
            let back = length(feet, "feet", "meters").unwrap();
            assert!(
                (back - value).abs() < 1e-4,
                "round trip of {} drifted to {}",
                value,
                back
            );
        }
    }

    #[test]
    fn same_unit_is_identity() {
        assert_eq!(length(1.85, "meters", "meters").unwrap(), 1.85);
        assert_eq!(temperature(21.5, "celsius", "celsius").unwrap(), 21.5);
    }

    #[test]
    fn negative_length_is_rejected() {
        assert!(length(-1.0, "meters", "feet").is_err());
    }

    #[test]
    fn unknown_length_unit_is_rejected() {
        assert!(length(1.0, "meters", "furlongs").is_err());
    }

    #[test]
    fn temperature_known_values() {
        assert_eq!(temperature(0.0, "celsius", "fahrenheit").unwrap(), 32.0);
        assert_eq!(temperature(100.0, "celsius", "fahrenheit").unwrap(), 212.0);
        assert_eq!(temperature(0.0, "celsius", "kelvin").unwrap(), 273.15);
        assert_eq!(temperature(32.0, "fahrenheit", "celsius").unwrap(), 0.0);
    }

    #[test]
    fn handler_formats_scalar_result() {
        let args = json!({"value": 3.0, "from_unit": "meters", "to_unit": "feet"});
        assert_eq!(convert_length_handler(&args).unwrap(), "9.8425");
    }

    #[test]
    fn handler_reports_missing_argument() {
        let args = json!({"value": 3.0, "from_unit": "meters"});
        assert!(convert_length_handler(&args).is_err());
    }
}
