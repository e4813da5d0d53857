//! MCP (Model Context Protocol) Server for Tally
//!
//! Exposes the budget agent to LLMs via MCP tools: recording transactions,
//! managing categories and rules, and running the analysis tools.
//!
//! # Architecture
//!
//! The server uses HTTP/SSE (Streamable HTTP) transport, mounted under
//! `/mcp`, for local network access.
//!
//! # Example
//!
//! ```bash
//! tally serve --port 3001
//! ```
//!
//! # Error handling
//!
//! Handled problems (bad input, missing rows, even storage failures) are
//! reported to the agent as plain text in a successful tool result, so the
//! agent can read the message and correct itself. MCP protocol errors are
//! reserved for transport-level faults.

use std::sync::Arc;

use rmcp::{
    handler::server::router::tool::ToolRouter,
    handler::server::wrapper::Parameters,
    model::{
        CallToolResult, Content, Implementation, ProtocolVersion, ServerCapabilities, ServerInfo,
    },
    tool, tool_handler, tool_router, ErrorData as McpError, ServerHandler,
};
use tokio::sync::Mutex;
use tracing::info;

use tally_core::db::Database;
use tally_core::tools::{
    self, AddTransactionParams, CheckPurchaseParams, CreateBudgetCategoryParams,
    CreateBudgetRuleParams, DeleteBudgetRuleParams, DeleteTransactionParams,
    GetTransactionsParams, HealthScoreParams, ProjectSpendingParams, SuggestAllocationParams,
    UsernameParams,
};

/// Render a tool outcome as agent-facing text
///
/// Failures become readable text under the given context ("adding
/// transaction" etc.) instead of a protocol error.
fn text_or_error(result: tally_core::Result<String>, context: &str) -> CallToolResult {
    match result {
        Ok(text) => CallToolResult::success(vec![Content::text(text)]),
        Err(e) => CallToolResult::success(vec![Content::text(format!(
            "Error {}: {}",
            context, e
        ))]),
    }
}

/// Like [`text_or_error`] but renders the failure as a JSON error object,
/// for tools whose success output is JSON
fn json_or_error(result: tally_core::Result<String>) -> CallToolResult {
    match result {
        Ok(text) => CallToolResult::success(vec![Content::text(text)]),
        Err(e) => CallToolResult::success(vec![Content::text(
            serde_json::json!({ "error": e.to_string() }).to_string(),
        )]),
    }
}

/// Tally MCP Server state
#[derive(Clone)]
pub struct TallyMcpServer {
    /// Database connection (wrapped for thread-safe access)
    db: Arc<Mutex<Database>>,
    /// Tool router for MCP operations
    tool_router: ToolRouter<Self>,
}

impl TallyMcpServer {
    /// Create a new MCP server with the given database
    pub fn new(db: Database) -> Self {
        Self {
            db: Arc::new(Mutex::new(db)),
            tool_router: Self::tool_router(),
        }
    }

    /// Get database access for tool implementations
    pub(crate) async fn db(&self) -> tokio::sync::MutexGuard<'_, Database> {
        self.db.lock().await
    }
}

#[tool_handler]
impl ServerHandler for TallyMcpServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::V_2025_03_26,
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation {
                name: "tally".to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
                title: Some("Tally Budget Agent".to_string()),
                website_url: Some("https://github.com/tally-tools/tally".to_string()),
                icons: None,
            },
            instructions: Some(
                "Tally is a budget agent backend. Use the available tools to record \
                 transactions, manage budget categories and rules, check rule compliance, \
                 and run budget calculations (purchase checks, allocations, health scores, \
                 and spending projections)."
                    .to_string(),
            ),
        }
    }
}

#[tool_router]
impl TallyMcpServer {
    #[tool(
        description = "Record a new financial transaction (expense or income) with amount, description, and category."
    )]
    async fn add_transaction(
        &self,
        Parameters(params): Parameters<AddTransactionParams>,
    ) -> Result<CallToolResult, McpError> {
        let db = self.db().await;
        Ok(text_or_error(
            tools::add_transaction(&db, params),
            "adding transaction",
        ))
    }

    #[tool(description = "Delete a transaction by its ID.")]
    async fn delete_transaction(
        &self,
        Parameters(params): Parameters<DeleteTransactionParams>,
    ) -> Result<CallToolResult, McpError> {
        let db = self.db().await;
        Ok(text_or_error(
            tools::delete_transaction(&db, params),
            "deleting transaction",
        ))
    }

    #[tool(description = "List recent transactions with optional category and type filtering.")]
    async fn get_transactions(
        &self,
        Parameters(params): Parameters<GetTransactionsParams>,
    ) -> Result<CallToolResult, McpError> {
        let db = self.db().await;
        Ok(text_or_error(
            tools::get_transactions(&db, params),
            "fetching transactions",
        ))
    }

    #[tool(description = "Create a new budget category with a monthly spending limit.")]
    async fn create_budget_category(
        &self,
        Parameters(params): Parameters<CreateBudgetCategoryParams>,
    ) -> Result<CallToolResult, McpError> {
        let db = self.db().await;
        Ok(text_or_error(
            tools::create_budget_category(&db, params),
            "creating category",
        ))
    }

    #[tool(description = "List all budget categories and their limits.")]
    async fn get_budget_categories(
        &self,
        Parameters(params): Parameters<UsernameParams>,
    ) -> Result<CallToolResult, McpError> {
        let db = self.db().await;
        Ok(text_or_error(
            tools::get_budget_categories(&db, params),
            "fetching categories",
        ))
    }

    #[tool(
        description = "Get a financial dashboard summary including income, expenses, and category breakdowns."
    )]
    async fn get_dashboard_summary(
        &self,
        Parameters(params): Parameters<UsernameParams>,
    ) -> Result<CallToolResult, McpError> {
        let db = self.db().await;
        Ok(text_or_error(
            tools::get_dashboard_summary(&db, params),
            "fetching dashboard",
        ))
    }

    #[tool(
        description = "Create a new budget rule. Rule types: percentage_allocation, category_limit, savings_goal, spending_alert. Config is a JSON string, e.g. {\"category\": \"Food\", \"limit\": 500}."
    )]
    async fn create_budget_rule(
        &self,
        Parameters(params): Parameters<CreateBudgetRuleParams>,
    ) -> Result<CallToolResult, McpError> {
        let db = self.db().await;
        Ok(text_or_error(
            tools::create_budget_rule(&db, params),
            "creating budget rule",
        ))
    }

    #[tool(description = "List all active budget rules for a user.")]
    async fn get_budget_rules(
        &self,
        Parameters(params): Parameters<UsernameParams>,
    ) -> Result<CallToolResult, McpError> {
        let db = self.db().await;
        Ok(text_or_error(
            tools::get_budget_rules(&db, params),
            "fetching budget rules",
        ))
    }

    #[tool(description = "Delete a budget rule by its ID.")]
    async fn delete_budget_rule(
        &self,
        Parameters(params): Parameters<DeleteBudgetRuleParams>,
    ) -> Result<CallToolResult, McpError> {
        let db = self.db().await;
        Ok(text_or_error(
            tools::delete_budget_rule(&db, params),
            "deleting budget rule",
        ))
    }

    #[tool(
        description = "Check if the user is following their active budget rules. Returns compliance status for each rule."
    )]
    async fn check_rule_compliance(
        &self,
        Parameters(params): Parameters<UsernameParams>,
    ) -> Result<CallToolResult, McpError> {
        let db = self.db().await;
        Ok(text_or_error(
            tools::check_rule_compliance(&db, params),
            "checking compliance",
        ))
    }

    #[tool(
        description = "Get spending insights and patterns. Useful for providing proactive budget advice."
    )]
    async fn get_spending_insights(
        &self,
        Parameters(params): Parameters<UsernameParams>,
    ) -> Result<CallToolResult, McpError> {
        let db = self.db().await;
        Ok(text_or_error(
            tools::get_spending_insights(&db, params),
            "generating insights",
        ))
    }

    #[tool(
        description = "Returns a list of popular budget methods with descriptions. Useful for guiding users when choosing a budget strategy."
    )]
    async fn get_budget_methods(&self) -> Result<CallToolResult, McpError> {
        Ok(json_or_error(tools::get_budget_methods()))
    }

    #[tool(
        description = "Check if a purchase is within budget. Pure calculation; returns a recommendation on whether to proceed."
    )]
    async fn check_budget_for_purchase(
        &self,
        Parameters(params): Parameters<CheckPurchaseParams>,
    ) -> Result<CallToolResult, McpError> {
        Ok(json_or_error(tools::check_budget_for_purchase(params)))
    }

    #[tool(
        description = "Suggest budget allocations based on income and chosen method (50/30/20, 80/20, pay_yourself_first)."
    )]
    async fn suggest_budget_allocation(
        &self,
        Parameters(params): Parameters<SuggestAllocationParams>,
    ) -> Result<CallToolResult, McpError> {
        Ok(json_or_error(tools::suggest_budget_allocation(params)))
    }

    #[tool(
        description = "Calculate a 0-100 financial health score from income, expenses, emergency fund, and debt load."
    )]
    async fn get_budget_health_score(
        &self,
        Parameters(params): Parameters<HealthScoreParams>,
    ) -> Result<CallToolResult, McpError> {
        Ok(json_or_error(tools::get_budget_health_score(params)))
    }

    #[tool(description = "Project end-of-month spending based on current pace.")]
    async fn project_monthly_spending(
        &self,
        Parameters(params): Parameters<ProjectSpendingParams>,
    ) -> Result<CallToolResult, McpError> {
        Ok(json_or_error(tools::project_monthly_spending(params)))
    }
}

/// Start the MCP server on the given host and port
pub async fn start_mcp_server(db: Database, host: &str, port: u16) -> anyhow::Result<()> {
    use rmcp::transport::streamable_http_server::session::local::LocalSessionManager;
    use rmcp::transport::streamable_http_server::StreamableHttpService;

    info!("Starting MCP server at http://{}:{}/mcp", host, port);

    let service = StreamableHttpService::new(
        move || Ok(TallyMcpServer::new(db.clone())),
        LocalSessionManager::default().into(),
        Default::default(),
    );

    let router = axum::Router::new().nest_service("/mcp", service);
    let addr = format!("{}:{}", host, port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    info!("MCP server ready at http://{}/mcp", addr);

    axum::serve(listener, router)
        .with_graceful_shutdown(async {
            // Wait for shutdown signal
            tokio::signal::ctrl_c().await.ok();
        })
        .await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_server_info() {
        let db = Database::in_memory().unwrap();
        let server = TallyMcpServer::new(db);
        let info = server.get_info();
        assert_eq!(info.server_info.name, "tally");
        assert!(info.instructions.is_some());
    }

    #[tokio::test]
    async fn test_tool_errors_render_as_text() {
        let result = text_or_error(
            Err(tally_core::Error::InvalidData("bad input".to_string())),
            "adding transaction",
        );
        assert_eq!(result.is_error, Some(false));

        let json = json_or_error(Err(tally_core::Error::InvalidData("bad".to_string())));
        assert_eq!(json.is_error, Some(false));
    }

    #[tokio::test]
    async fn test_storage_tool_through_server() {
        let db = Database::in_memory().unwrap();
        let server = TallyMcpServer::new(db);

        let result = server
            .add_transaction(Parameters(AddTransactionParams {
                amount: 12.0,
                description: "Lunch".to_string(),
                category: "Food".to_string(),
                transaction_type: "expense".to_string(),
                username: "default_user".to_string(),
                date: None,
            }))
            .await
            .unwrap();
        assert_eq!(result.is_error, Some(false));
    }
}
