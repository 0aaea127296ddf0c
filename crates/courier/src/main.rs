mod client;
mod config;

use anyhow::Result;
use client::ApiClient;
use config::Config;

#[tokio::main]
async fn main() -> Result<()> {
    // Load config
    let mut config = match Config::load() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load config: {}", e);
            return Err(e);
        }
    };

    // Parse args
    let args: Vec<String> = std::env::args().collect();

    // Create API client
    let client = ApiClient::new(config.server_url.clone());

    let command = args.get(1).map(|s| s.as_str()).unwrap_or("help");

    match command {
        "tools" => {
            let tools = match client.list_tools().await {
                Ok(tools) => tools,
                Err(e) => {
                    eprintln!("Failed to connect to Switchboard at {}: {}", config.server_url, e);
                    eprintln!("Is the Switchboard server running?");
                    return Err(e);
                }
            };

            println!("Available tools:");
            for tool in tools {
                println!("  - {}: {}", tool.function.name, tool.function.description);
            }
        }
        "resolve" => {
            let prompt = require_prompt(&args)?;
            let tool_call = client.get_toolcall(&prompt).await?;
            println!("{}", serde_json::to_string_pretty(&tool_call)?);
        }
        "call" => {
            // Resolve, then execute — without the final model round-trip.
            let prompt = require_prompt(&args)?;
            let tool_call = client.get_toolcall(&prompt).await?;

            match tool_call.as_object() {
                Some(calls) => {
                    println!("Tool call: {}", serde_json::to_string(&calls)?);
                    let results = client.execute_toolcall(calls).await?;
                    for (name, result) in &results {
                        println!("{}: {}", name, result.as_str().unwrap_or_default());
                    }
                }
                None => {
                    // Free-text fallback: nothing to execute
                    println!("{}", tool_call.as_str().unwrap_or_default());
                }
            }
        }
        "config" => {
            if args.len() < 3 {
                println!("Current config:");
                println!("  Server URL: {}", config.server_url);
            } else if args[2] == "set" && args.len() >= 5 && args[3] == "server" {
                config.server_url = args[4].clone();
                config.save()?;
                println!("Server URL updated to: {}", config.server_url);
            } else {
                print_usage();
            }
        }
        "help" => print_usage(),
        _ => {
            // Treat any other arguments as a question for the full answer loop
            let prompt = args[1..].join(" ");
            let answer = client.ask(&prompt).await?;
            println!("{}", answer);
        }
    }

    Ok(())
}

fn require_prompt(args: &[String]) -> Result<String> {
    if args.len() < 3 {
        print_usage();
        return Err(anyhow::anyhow!("Missing prompt argument"));
    }
    Ok(args[2..].join(" "))
}

fn print_usage() {
    println!("Courier - Client for Switchboard");
    println!("\nUsage:");
    println!("  courier \"your question\"        Resolve, execute, and answer");
    println!("  courier tools                  List the tool catalogue");
    println!("  courier resolve \"question\"     Show the resolved tool call only");
    println!("  courier call \"question\"        Resolve and execute, print raw results");
    println!("  courier config                 Show current configuration");
    println!("  courier config set server URL  Set server URL");
}
