use anyhow::Result;
use scraper::{Html, Selector};
use serde_json::json;

use crate::register_toolbelt;

const DUCKDUCKGO_HTML: &str = "https://html.duckduckgo.com/html/";

pub struct WebSearch {
    client: reqwest::Client,
}

impl Default for WebSearch {
    fn default() -> Self {
        Self {
            client: reqwest::Client::builder()
                .user_agent("Mozilla/5.0")
                .timeout(std::time::Duration::from_secs(15))
                .build()
                .expect("failed to build HTTP client"),
        }
    }
}

register_toolbelt! {
    WebSearch {
        description: "Search the web via the DuckDuckGo HTML endpoint",
        tools: {
            "web_search" => search {
                description: "Perform a web search and return result titles and links.",
                params: [
                    "query": "string" => "Search query string",
                ],
                optional: [
                    "max_results": "integer" => "Maximum number of results to return (default: 5, max: 10)",
                ]
            }
        }
    }
}

impl WebSearch {
    fn search(&self, args: &serde_json::Value) -> Result<String> {
        let query = args["query"].as_str().unwrap_or("");
        if query.is_empty() {
            return Ok("Error: query cannot be empty".to_string());
        }

        let max_results = args["max_results"].as_i64().unwrap_or(5).clamp(1, 10) as usize;

        tokio::task::block_in_place(|| {
            tokio::runtime::Handle::current()
                .block_on(async { self.search_duckduckgo(query, max_results).await })
        })
    }

    async fn search_duckduckgo(&self, query: &str, max_results: usize) -> Result<String> {
        let response = self
            .client
            .post(DUCKDUCKGO_HTML)
            .form(&[("q", query)])
            .send()
            .await?;

        if !response.status().is_success() {
            return Ok(format!("Search failed: {}", response.status()));
        }

        let html = response.text().await?;
        Ok(serde_json::to_string(&parse_results(&html, max_results))?)
    }
}

fn parse_results(html: &str, max_results: usize) -> Vec<serde_json::Value> {
    let document = Html::parse_document(html);
    let selector = Selector::parse("a.result__a").unwrap();

    document
        .select(&selector)
        .take(max_results)
        .map(|anchor| {
            let title: String = anchor.text().collect::<String>().trim().to_string();
            let link = anchor.value().attr("href").unwrap_or("");
            json!({"title": title, "link": link})
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const RESULTS_PAGE: &str = r#"
        <html><body>
          <a class="result__a" href="https://example.com/a">First result</a>
          <a class="other" href="https://example.com/skip">Not a result</a>
          <a class="result__a" href="https://example.com/b">Second result</a>
        </body></html>
    "#;

    #[test]
    fn extracts_result_anchors_only() {
        let results = parse_results(RESULTS_PAGE, 5);
        assert_eq!(results.len(), 2);
        assert_eq!(results[0]["title"], "First result");
        assert_eq!(results[0]["link"], "https://example.com/a");
        assert_eq!(results[1]["link"], "https://example.com/b");
    }

    #[test]
    fn respects_result_limit() {
        let results = parse_results(RESULTS_PAGE, 1);
        assert_eq!(results.len(), 1);
    }

    #[test]
    fn empty_page_yields_no_results() {
        assert!(parse_results("<html></html>", 5).is_empty());
    }
}
