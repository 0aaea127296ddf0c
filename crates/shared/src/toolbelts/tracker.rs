use anyhow::Result;
use serde_json::{json, Map, Value};

use crate::register_toolbelt;

pub struct ItemTracker {
    base_url: String,
    client: reqwest::Client,
}

impl Default for ItemTracker {
    fn default() -> Self {
        Self {
            base_url: std::env::var("ITEM_TRACKER_API")
                .unwrap_or_else(|_| "http://localhost:3310".to_string()),
            client: reqwest::Client::new(),
        }
    }
}

register_toolbelt! {
    ItemTracker {
        description: "Track stored items via the Item Tracker service",
        tools: {
            "add_item" => add_item {
                description: "Add a new item to the Item Tracker.",
                params: [
                    "name": "string" => "Name of the item",
                    "quantity": "integer" => "Quantity of the item",
                    "replacement_date": "string" => "Replacement date in YYYY-MM-DD format",
                ],
                optional: [
                    "storage_name": "string" => "Storage location (default empty)",
                    "expiration_date": "string" => "Expiration date in YYYY-MM-DD format",
                ]
            },
            "edit_item" => edit_item {
                description: "Edit an existing item in the Item Tracker.",
                params: [
                    "item_id": "integer" => "ID of the item to edit",
                ],
                optional: [
                    "name": "string" => "New name",
                    "quantity": "integer" => "New quantity",
                    "replacement_date": "string" => "New replacement date",
                    "storage_name": "string" => "New storage location",
                    "expiration_date": "string" => "New expiration date",
                ]
            },
            "remove_item" => remove_item {
                description: "Remove an item from the Item Tracker.",
                params: [
                    "item_id": "integer" => "ID of the item to remove",
                ]
            }
        }
    }
}

impl ItemTracker {
    fn add_item(&self, args: &serde_json::Value) -> Result<String> {
        let name = args["name"]
            .as_str()
            .ok_or_else(|| anyhow::anyhow!("Missing 'name' argument"))?;
        let quantity = args["quantity"]
            .as_i64()
            .ok_or_else(|| anyhow::anyhow!("Missing 'quantity' argument"))?;
        let replacement_date = args["replacement_date"]
            .as_str()
            .ok_or_else(|| anyhow::anyhow!("Missing 'replacement_date' argument"))?;

        let payload = json!({
            "name": name,
            "quantity": quantity,
            "replacement_date": replacement_date,
            "storage_name": args["storage_name"].as_str().unwrap_or(""),
            "expiration_date": args["expiration_date"].as_str(),
        });

        tokio::task::block_in_place(|| {
            tokio::runtime::Handle::current().block_on(async {
                let resp = self
                    .client
                    .post(format!("{}/items/", self.base_url))
                    .json(&payload)
                    .send()
                    .await?;

                if resp.status().is_success() {
                    Ok(format!("Item '{}' added successfully.", name))
                } else {
                    Ok(format!("Failed to add item: {}", resp.text().await?))
                }
            })
        })
    }

    fn edit_item(&self, args: &serde_json::Value) -> Result<String> {
        let item_id = args["item_id"]
            .as_i64()
            .ok_or_else(|| anyhow::anyhow!("Missing 'item_id' argument"))?;

        let payload = update_payload(args);
        if payload.is_empty() {
            return Ok("No fields to update.".to_string());
        }

        tokio::task::block_in_place(|| {
            tokio::runtime::Handle::current().block_on(async {
                let resp = self
                    .client
                    .patch(format!("{}/items/{}", self.base_url, item_id))
                    .json(&payload)
                    .send()
                    .await?;

                if resp.status().is_success() {
                    Ok(format!("Item {} updated successfully.", item_id))
                } else {
                    Ok(format!("Failed to update item: {}", resp.text().await?))
                }
            })
        })
    }

    fn remove_item(&self, args: &serde_json::Value) -> Result<String> {
        let item_id = args["item_id"]
            .as_i64()
            .ok_or_else(|| anyhow::anyhow!("Missing 'item_id' argument"))?;

        tokio::task::block_in_place(|| {
            tokio::runtime::Handle::current().block_on(async {
                let resp = self
                    .client
                    .delete(format!("{}/items/{}", self.base_url, item_id))
                    .send()
                    .await?;

                if resp.status().is_success() {
                    Ok(format!("Item {} removed successfully.", item_id))
                } else {
                    Ok(format!("Failed to remove item: {}", resp.text().await?))
                }
            })
        })
    }
}

/// Partial-update body: only the fields present in the arguments.
fn update_payload(args: &Value) -> Map<String, Value> {
    let mut payload = Map::new();

    if let Some(name) = args["name"].as_str() {
        payload.insert("name".to_string(), json!(name));
    }
    if let Some(quantity) = args["quantity"].as_i64() {
        payload.insert("quantity".to_string(), json!(quantity));
    }
    for field in ["replacement_date", "storage_name", "expiration_date"] {
        if let Some(value) = args[field].as_str() {
            payload.insert(field.to_string(), json!(value));
        }
    }

    payload
}
