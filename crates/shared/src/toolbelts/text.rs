use anyhow::{bail, Result};
use rand::seq::SliceRandom;
use rand::Rng;
use serde_json::json;

use crate::register_toolbelt;

const LOWERCASE: &str = "abcdefghijklmnopqrstuvwxyz";
const UPPERCASE: &str = "ABCDEFGHIJKLMNOPQRSTUVWXYZ";
const DIGITS: &str = "0123456789";
const SYMBOLS: &str = "!@#$%^&*()_+-=[]{}|;:,.<>?";

#[derive(Default)]
pub struct Text;

register_toolbelt! {
    Text {
        description: "Analyze and generate text",
        tools: {
            "count_words" => count_words {
                description: "Count words, characters, and lines in a text.",
                params: [
                    "text": "string" => "The text to analyze",
                ]
            },
            "generate_password" => generate_password {
                description: "Generate a secure random password.",
                params: [],
                optional: [
                    "length": "integer" => "Password length (minimum 4, maximum 128, default 12)",
                    "include_symbols": "boolean" => "Include special characters (default true)",
                    "include_numbers": "boolean" => "Include numbers (default true)",
                    "include_uppercase": "boolean" => "Include uppercase letters (default true)",
                ]
            }
        }
    }
}

impl Text {
    fn count_words(&self, args: &serde_json::Value) -> Result<String> {
        let text = args["text"].as_str().unwrap_or("");

        if text.is_empty() {
            return Ok(json!({"words": 0, "characters": 0, "lines": 0}).to_string());
        }

        let words = text.split_whitespace().count();
        let characters = text.chars().count();
        let lines = text.split('\n').count();

        Ok(json!({
            "words": words,
            "characters": characters,
            "lines": lines
        })
        .to_string())
    }

    fn generate_password(&self, args: &serde_json::Value) -> Result<String> {
        let length = args["length"].as_u64().unwrap_or(12) as usize;
        let include_symbols = args["include_symbols"].as_bool().unwrap_or(true);
        let include_numbers = args["include_numbers"].as_bool().unwrap_or(true);
        let include_uppercase = args["include_uppercase"].as_bool().unwrap_or(true);

        if !(4..=128).contains(&length) {
            bail!("Password length must be between 4 and 128 characters");
        }

        let mut pool = String::from(LOWERCASE);
        if include_uppercase {
            pool.push_str(UPPERCASE);
        }
        if include_numbers {
            pool.push_str(DIGITS);
        }
        if include_symbols {
            pool.push_str(SYMBOLS);
        }

        let mut rng = rand::thread_rng();

        // At least one character from every enabled set
        let mut password = vec![pick(&mut rng, LOWERCASE)];
        if include_uppercase {
            password.push(pick(&mut rng, UPPERCASE));
        }
        if include_numbers {
            password.push(pick(&mut rng, DIGITS));
        }
        if include_symbols {
            password.push(pick(&mut rng, SYMBOLS));
        }

        while password.len() < length {
            password.push(pick(&mut rng, &pool));
        }
        password.shuffle(&mut rng);

        Ok(password.into_iter().collect())
    }
}

fn pick(rng: &mut impl Rng, set: &str) -> char {
    let bytes = set.as_bytes();
    bytes[rng.gen_range(0..bytes.len())] as char
}
