// Tutor Bridge MCP Server
// Exposes the Runbook Tutor bridge operations as MCP tools for AI assistants
//
// Run with: cargo run --bin tutor-bridge-mcp
//
// The server talks to the local assistant-management service and the Sema4
// Desktop registry; it keeps no state of its own.

use rmcp::{
    handler::server::tool::{ToolCallContext, ToolRouter},
    handler::server::wrapper::Parameters,
    model::*,
    service::RequestContext,
    tool, tool_router, ErrorData as McpError, ServerHandler,
};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use tokio::io::{stdin, stdout};
#[cfg(unix)]
use tokio::signal::unix::{signal, SignalKind};

use tutor_bridge_lib::actions;
use tutor_bridge_lib::config::{Config, INSTALL_HOME_ENV};
use tutor_bridge_lib::models::InternalActionPackages;

// ============================================================================
// Parameter Types for Tools (must derive JsonSchema)
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct GetActionsParams {
    /// Names of action packages to exclude from the listing, usually the
    /// tutoring stack's own packages
    pub internal_action_names: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct DeployAgentParams {
    /// The name of the agent to deploy
    pub name: String,
    /// The description of the agent to deploy
    pub description: String,
    /// The system prompt (runbook) the agent will follow
    pub system_prompt: String,
    /// JSON-encoded list of {"tool_name": string, "port": int} objects; the
    /// port MUST come from a previous get_actions call
    pub tool_names: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct AssistantIdParams {
    /// Id of the assistant
    pub assistant_id: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct UpdateRunbookParams {
    /// Id of the assistant
    pub assistant_id: String,
    /// The new runbook for the assistant. Include a COMPLETE runbook, not
    /// just the updated parts
    pub new_runbook: String,
}

// ============================================================================
// MCP Server Implementation
// ============================================================================

#[derive(Clone)]
pub struct TutorBridgeMcp {
    /// Tool router for handling tool calls
    tool_router: ToolRouter<Self>,
    config: Config,
}

impl TutorBridgeMcp {
    pub fn new(config: Config) -> Self {
        Self {
            tool_router: Self::tool_router(),
            config,
        }
    }
}

#[tool_router]
impl TutorBridgeMcp {
    /// List the action servers registered with the local desktop
    #[tool(
        description = "List the action servers registered with the local Sema4 Desktop, each with its name, port, and full API specification. Actions named in internal_action_names are excluded from the listing."
    )]
    async fn get_actions(
        &self,
        Parameters(params): Parameters<GetActionsParams>,
    ) -> Result<CallToolResult, McpError> {
        let internal = InternalActionPackages::new(params.internal_action_names);
        match actions::get_actions(&self.config, &internal) {
            Ok(listing) => {
                let json = serde_json::to_string_pretty(&listing)
                    .map_err(|e| McpError::internal_error(e.to_string(), None))?;
                Ok(CallToolResult::success(vec![Content::text(json)]))
            }
            Err(e) => Ok(CallToolResult::error(vec![Content::text(String::from(e))])),
        }
    }

    /// Deploy a new agent with a runbook and action-server tools
    #[tool(
        description = "Deploy an agent to the desktop that will use the provided system prompt as its runbook. tool_names is a JSON string holding a list of {\"tool_name\", \"port\"} objects; ports MUST be obtained from get_actions. Returns the new assistant and welcome thread IDs."
    )]
    async fn deploy_agent_to_desktop(
        &self,
        Parameters(params): Parameters<DeployAgentParams>,
    ) -> Result<CallToolResult, McpError> {
        let deployed = actions::deploy_agent_to_desktop(
            &self.config,
            &params.name,
            &params.description,
            &params.system_prompt,
            &params.tool_names,
        )
        .await;

        match deployed {
            Ok(agent) => {
                let json = serde_json::to_string_pretty(&agent)
                    .map_err(|e| McpError::internal_error(e.to_string(), None))?;
                Ok(CallToolResult::success(vec![Content::text(json)]))
            }
            Err(e) => Ok(CallToolResult::error(vec![Content::text(String::from(e))])),
        }
    }

    /// Render an assistant's most recent conversation
    #[tool(
        description = "Get the rendered transcript of an assistant's most recently updated thread."
    )]
    async fn get_latest_thread(
        &self,
        Parameters(params): Parameters<AssistantIdParams>,
    ) -> Result<CallToolResult, McpError> {
        match actions::get_latest_thread(&self.config, &params.assistant_id).await {
            Ok(transcript) => Ok(CallToolResult::success(vec![Content::text(transcript)])),
            Err(e) => Ok(CallToolResult::error(vec![Content::text(String::from(e))])),
        }
    }

    /// List all deployed agents
    #[tool(description = "Get all agent names and their assistant IDs.")]
    async fn get_all_agents(&self) -> Result<CallToolResult, McpError> {
        match actions::get_all_agents(&self.config).await {
            Ok(listing) => Ok(CallToolResult::success(vec![Content::text(listing)])),
            Err(e) => Ok(CallToolResult::error(vec![Content::text(String::from(e))])),
        }
    }

    /// Fetch an assistant's runbook
    #[tool(description = "Get the runbook (system message) of an assistant.")]
    async fn get_agent_runbook(
        &self,
        Parameters(params): Parameters<AssistantIdParams>,
    ) -> Result<CallToolResult, McpError> {
        let runbook = actions::get_agent_runbook(&self.config, &params.assistant_id).await;
        Ok(CallToolResult::success(vec![Content::text(runbook)]))
    }

    /// Replace an assistant's runbook
    #[tool(
        description = "Update the runbook of an existing assistant. Include a COMPLETE runbook, not just the updated parts."
    )]
    async fn update_agent_runbook(
        &self,
        Parameters(params): Parameters<UpdateRunbookParams>,
    ) -> Result<CallToolResult, McpError> {
        let outcome =
            actions::update_agent_runbook(&self.config, &params.assistant_id, &params.new_runbook)
                .await;
        match outcome {
            Ok(message) => Ok(CallToolResult::success(vec![Content::text(message)])),
            Err(e) => Ok(CallToolResult::error(vec![Content::text(String::from(e))])),
        }
    }
}

impl ServerHandler for TutorBridgeMcp {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::default(),
            capabilities: ServerCapabilities {
                tools: Some(ToolsCapability::default()),
                ..Default::default()
            },
            server_info: Implementation {
                name: "tutor-bridge-mcp".to_string(),
                title: Some("Tutor Bridge MCP Server".to_string()),
                version: env!("CARGO_PKG_VERSION").to_string(),
                icons: None,
                website_url: None,
            },
            instructions: Some(
                "Tutor Bridge MCP Server bridges the Runbook Tutor to the local Sema4 Desktop: list registered action servers, deploy agents with runbooks, and inspect or update deployed assistants and their threads."
                    .to_string(),
            ),
        }
    }

    fn list_tools(
        &self,
        _request: Option<PaginatedRequestParam>,
        _context: RequestContext<rmcp::RoleServer>,
    ) -> impl std::future::Future<Output = Result<ListToolsResult, McpError>> + Send + '_ {
        async move {
            Ok(ListToolsResult {
                tools: self.tool_router.list_all(),
                next_cursor: None,
            })
        }
    }

    fn call_tool(
        &self,
        request: CallToolRequestParam,
        context: RequestContext<rmcp::RoleServer>,
    ) -> impl std::future::Future<Output = Result<CallToolResult, McpError>> + Send + '_ {
        async move {
            eprintln!("[MCP Server] Tool call: {}", request.name);
            let tool_context = ToolCallContext::new(self, request, context);
            self.tool_router.call(tool_context).await
        }
    }
}

/// Print help information
fn print_help() {
    let version = env!("CARGO_PKG_VERSION");
    println!(
        r#"tutor-bridge-mcp {}

USAGE:
    tutor-bridge-mcp [OPTIONS]

OPTIONS:
    --help, -h      Print this help information
    --version, -v   Print version information
    --list-tools    List all available MCP tools

DESCRIPTION:
    Tutor Bridge MCP Server gives AI assistants tools to work with the local
    Sema4 Desktop: discover registered action servers, deploy agents with
    runbooks, and inspect or update deployed assistants.

MCP TOOLS:

  📦 ACTION SERVERS
    get_actions          List registered action servers with API specs

  🤖 AGENTS
    deploy_agent_to_desktop  Deploy an agent with a runbook and tools
    get_all_agents           List deployed agents and their IDs
    get_agent_runbook        Get an assistant's runbook
    update_agent_runbook     Replace an assistant's runbook

  💬 THREADS
    get_latest_thread    Render an assistant's most recent conversation

CONFIGURATION:
    ROBOCORP_HOME      Desktop installation home (required for get_actions)
    TUTOR_BRIDGE_URL   Assistant service base URL (default http://127.0.0.1:8100)
    TUTOR_BRIDGE_ROOT  Directory holding template.yml and prompts

EXAMPLES:
    # Start the MCP server (for AI integration)
    tutor-bridge-mcp

    # List available tools
    tutor-bridge-mcp --list-tools
"#,
        version
    );
}

/// Print version information
fn print_version() {
    println!("tutor-bridge-mcp {}", env!("CARGO_PKG_VERSION"));
}

/// List all tools in a simple format
fn list_tools_simple() {
    println!("Tutor Bridge MCP Tools:\n");
    let tools = [
        ("get_actions", "List registered action servers with API specs"),
        ("deploy_agent_to_desktop", "Deploy an agent with a runbook and tools"),
        ("get_latest_thread", "Render an assistant's most recent conversation"),
        ("get_all_agents", "List deployed agents and their IDs"),
        ("get_agent_runbook", "Get an assistant's runbook"),
        ("update_agent_runbook", "Replace an assistant's runbook"),
    ];

    for (name, desc) in tools {
        println!("  {:<25} {}", name, desc);
    }
    println!();
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Parse command line arguments
    let args: Vec<String> = std::env::args().collect();

    for arg in &args[1..] {
        match arg.as_str() {
            "--help" | "-h" => {
                print_help();
                return Ok(());
            }
            "--version" | "-v" => {
                print_version();
                return Ok(());
            }
            "--list-tools" => {
                list_tools_simple();
                return Ok(());
            }
            _ => {
                eprintln!("Unknown option: {}", arg);
                eprintln!("Use --help for usage information");
                std::process::exit(1);
            }
        }
    }

    eprintln!(
        "[MCP Server] Starting Tutor Bridge MCP Server (PID: {})...",
        std::process::id()
    );

    let config = Config::from_env();
    eprintln!("[MCP Server] Assistant service: {}", config.base_url);
    if config.install_home.is_none() {
        eprintln!(
            "[MCP Server] {} not set; action listing will fail until it is",
            INSTALL_HOME_ENV
        );
    }

    // Create the MCP server
    let server = TutorBridgeMcp::new(config);

    // Run with stdio transport
    let transport = (stdin(), stdout());
    let service = rmcp::serve_server(server, transport).await?;

    // Set up signal handlers for graceful shutdown (Unix only)
    #[cfg(unix)]
    {
        let mut sigterm = signal(SignalKind::terminate())?;
        let mut sigint = signal(SignalKind::interrupt())?;
        let mut sighup = signal(SignalKind::hangup())?;

        tokio::select! {
            result = service.waiting() => {
                match result {
                    Ok(_) => eprintln!("[MCP Server] Service ended normally"),
                    Err(e) => eprintln!("[MCP Server] Service ended with error: {:?}", e),
                }
            }
            _ = sigterm.recv() => {
                eprintln!("[MCP Server] Received SIGTERM, shutting down gracefully...");
            }
            _ = sigint.recv() => {
                eprintln!("[MCP Server] Received SIGINT, shutting down gracefully...");
            }
            _ = sighup.recv() => {
                eprintln!("[MCP Server] Received SIGHUP (parent process died), shutting down...");
            }
        }
    }

    // Non-Unix platforms: just wait for service
    #[cfg(not(unix))]
    {
        service.waiting().await?;
    }

    eprintln!("[MCP Server] Shutdown complete");
    Ok(())
}
