//! Built-in agents, teams, and the tool list offered to custom agents.

use crate::core::model::{Agent, Team, TeamMode};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ToolSpec {
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
}

pub const AVAILABLE_TOOLS: &[ToolSpec] = &[
    ToolSpec {
        id: "duckduckgo",
        name: "DuckDuckGo Search",
        description: "Web search",
    },
    ToolSpec {
        id: "arxiv",
        name: "ArXiv",
        description: "Academic paper search",
    },
    ToolSpec {
        id: "hackernews",
        name: "HackerNews",
        description: "Technology news and discussion",
    },
    ToolSpec {
        id: "reasoning",
        name: "Reasoning",
        description: "Advanced reasoning",
    },
];

pub fn find_tool(id: &str) -> Option<&'static ToolSpec> {
    AVAILABLE_TOOLS.iter().find(|tool| tool.id == id)
}

pub fn predefined_agents() -> Vec<Agent> {
    vec![
        Agent {
            id: "aws-docs".to_string(),
            name: "AWS Documentation Agent".to_string(),
            role: "AWS expert".to_string(),
            instructions: "Understand requests about AWS documentation and autonomously \
                           retrieve, search, and recommend information"
                .to_string(),
            tools: vec!["search".to_string(), "documentation".to_string()],
            is_custom: false,
        },
        Agent {
            id: "arxiv".to_string(),
            name: "Arxiv Agent".to_string(),
            role: "Paper assistant".to_string(),
            instructions: "Autonomously search papers on arXiv and retrieve their contents"
                .to_string(),
            tools: vec!["arxiv".to_string(), "reasoning".to_string()],
            is_custom: false,
        },
    ]
}

pub fn predefined_teams() -> Vec<Team> {
    let members = || vec!["aws-docs".to_string(), "arxiv".to_string()];
    vec![
        Team {
            id: "mcp-route".to_string(),
            name: "MCP Route Team".to_string(),
            mode: TeamMode::Route,
            agents: members(),
            instructions: "Route queries to the most suitable agent".to_string(),
            is_custom: false,
        },
        Team {
            id: "mcp-coordinate".to_string(),
            name: "MCP Coordinate Team".to_string(),
            mode: TeamMode::Coordinate,
            agents: members(),
            instructions: "Coordinate several agents to solve complex problems".to_string(),
            is_custom: false,
        },
        Team {
            id: "mcp-collaborate".to_string(),
            name: "MCP Collaborate Team".to_string(),
            mode: TeamMode::Collaborate,
            agents: members(),
            instructions: "Agents cooperate and develop each other's answers".to_string(),
            is_custom: false,
        },
    ]
}
