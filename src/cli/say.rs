//! TUI-less "say" command

use std::error::Error;

use tracing::warn;

use crate::api::{ApiClient, ApiError, ChatGateway};
use crate::core::catalog::{predefined_agents, predefined_teams};
use crate::core::send_flow::send_message;
use crate::core::session::SessionStore;

#[derive(Debug, Clone, Default)]
pub struct SayOptions {
    pub agent: Option<String>,
    pub team: Option<String>,
    pub reasoning: bool,
    pub prompt: Vec<String>,
}

/// Entries the send appended after the user's own message, plus the gateway
/// error if the send failed.
#[derive(Debug)]
pub struct SayOutcome {
    pub lines: Vec<String>,
    pub error: Option<ApiError>,
}

pub async fn run_say(base_url: &str, options: SayOptions) -> Result<(), Box<dyn Error>> {
    let gateway = ApiClient::new(base_url);
    let store = catalog_store(&gateway).await;
    let outcome = say(&gateway, store, options).await?;
    for line in &outcome.lines {
        println!("{line}");
    }
    match outcome.error {
        Some(err) => Err(err.into()),
        None => Ok(()),
    }
}

/// A store knowing the built-in catalog plus whatever the backend lists, so
/// ids printed by `agents` and `teams` are accepted. Built-in entries win on
/// id clashes. An unreachable catalog leaves only the built-ins.
pub async fn catalog_store(client: &ApiClient) -> SessionStore {
    let agents = client.get_agents().await.unwrap_or_else(|err| {
        warn!(error = %err, "could not fetch backend agents");
        Vec::new()
    });
    let teams = client.get_teams().await.unwrap_or_else(|err| {
        warn!(error = %err, "could not fetch backend teams");
        Vec::new()
    });
    SessionStore::with_catalog(
        merge_by_id(predefined_agents(), agents, |agent| &agent.id),
        merge_by_id(predefined_teams(), teams, |team| &team.id),
    )
}

fn merge_by_id<T>(mut known: Vec<T>, fetched: Vec<T>, id: impl Fn(&T) -> &String) -> Vec<T> {
    for item in fetched {
        if !known.iter().any(|existing| id(existing) == id(&item)) {
            known.push(item);
        }
    }
    known
}

pub async fn say(
    gateway: &dyn ChatGateway,
    mut store: SessionStore,
    options: SayOptions,
) -> Result<SayOutcome, Box<dyn Error>> {
    let prompt = options.prompt.join(" ");
    if prompt.trim().is_empty() {
        return Err("Usage: agentchat say [--agent ID | --team ID] <message>".into());
    }

    store.set_reasoning(options.reasoning);
    if let Some(id) = options.agent.as_deref() {
        if !store.set_selected_agent(Some(id)) {
            return Err(format!("Unknown agent: {id}").into());
        }
    }
    if let Some(id) = options.team.as_deref() {
        if !store.set_selected_team(Some(id)) {
            return Err(format!("Unknown team: {id}").into());
        }
    }

    let error = send_message(&mut store, gateway, &prompt).await.err();
    let lines = store
        .messages()
        .iter()
        .filter(|message| !message.is_user())
        .map(|message| message.to_plain_text())
        .collect();
    Ok(SayOutcome { lines, error })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::StreamChunk;
    use crate::core::model::ChatTarget;
    use crate::core::send_flow::{FAILURE_NOTICE, NO_SELECTION_NOTICE};
    use crate::utils::test_utils::{
        spawn_mock_server, test_http_client, MockGateway, MockResponse, ScriptedReply,
    };

    fn prompt(text: &str) -> Vec<String> {
        text.split(' ').map(str::to_string).collect()
    }

    #[tokio::test]
    async fn prints_reasoning_tools_and_answer() {
        let gateway = MockGateway::new().with_reply(ScriptedReply::Chunks(vec![
            StreamChunk::ReasoningChunk {
                content: "Look up papers".to_string(),
            },
            StreamChunk::ToolCall {
                tool_name: "arxiv".to_string(),
            },
            StreamChunk::AnswerChunk {
                content: "Three papers found.".to_string(),
            },
        ]));

        let outcome = say(
            &gateway,
            SessionStore::new(),
            SayOptions {
                agent: Some("arxiv".to_string()),
                reasoning: true,
                prompt: prompt("find transformer papers"),
                ..Default::default()
            },
        )
        .await
        .expect("say");

        assert!(outcome.error.is_none());
        assert_eq!(outcome.lines.len(), 3);
        assert_eq!(outcome.lines[0], "Arxiv Agent: Three papers found.");
        assert!(outcome.lines[1].starts_with("Reasoning Process: "));

        let sent = gateway.sent();
        assert_eq!(sent[0].content, "find transformer papers");
        assert_eq!(sent[0].target, ChatTarget::Agent("arxiv".to_string()));
        assert!(sent[0].reasoning);
    }

    #[tokio::test]
    async fn without_target_prints_the_notice() {
        let gateway = MockGateway::new();
        let outcome = say(
            &gateway,
            SessionStore::new(),
            SayOptions {
                prompt: prompt("hello"),
                ..Default::default()
            },
        )
        .await
        .expect("say");

        assert_eq!(outcome.lines, vec![format!("System: {NO_SELECTION_NOTICE}")]);
        assert!(gateway.sent().is_empty());
    }

    #[tokio::test]
    async fn gateway_failure_is_reported() {
        let gateway = MockGateway::new().with_reply(ScriptedReply::Status(502));
        let outcome = say(
            &gateway,
            SessionStore::new(),
            SayOptions {
                team: Some("mcp-route".to_string()),
                prompt: prompt("hi"),
                ..Default::default()
            },
        )
        .await
        .expect("say");

        assert!(outcome.error.is_some());
        assert!(outcome
            .lines
            .contains(&format!("System: {FAILURE_NOTICE}")));
    }

    #[tokio::test]
    async fn unknown_ids_and_empty_prompts_are_rejected() {
        let gateway = MockGateway::new();
        let unknown = say(
            &gateway,
            SessionStore::new(),
            SayOptions {
                agent: Some("nope".to_string()),
                prompt: prompt("hi"),
                ..Default::default()
            },
        )
        .await;
        assert_eq!(
            unknown.map(|_| ()).map_err(|e| e.to_string()),
            Err("Unknown agent: nope".to_string())
        );

        let empty = say(&gateway, SessionStore::new(), SayOptions::default()).await;
        assert!(empty.is_err());
    }

    #[tokio::test]
    async fn backend_catalog_ids_are_accepted() {
        let server = spawn_mock_server(vec![
            MockResponse::json(
                200,
                r#"[{"id":"scout","name":"Scout","role":"Research"},{"id":"arxiv","name":"Shadow"}]"#,
            ),
            MockResponse::json(
                200,
                r#"[{"id":"ops","name":"Ops Team","mode":"coordinate","agents":["scout"]}]"#,
            ),
        ])
        .await;
        let client = ApiClient::with_client(test_http_client(), &server.base_url);
        let store = catalog_store(&client).await;

        assert!(store.all_agents().any(|agent| agent.id == "scout"));
        assert!(store.all_teams().any(|team| team.id == "ops"));
        let arxiv: Vec<_> = store.all_agents().filter(|a| a.id == "arxiv").collect();
        assert_eq!(arxiv.len(), 1);
        assert_eq!(arxiv[0].name, "Arxiv Agent");

        let gateway = MockGateway::new();
        say(
            &gateway,
            store,
            SayOptions {
                agent: Some("scout".to_string()),
                prompt: prompt("hi"),
                ..Default::default()
            },
        )
        .await
        .expect("say");
        assert_eq!(gateway.sent()[0].target, ChatTarget::Agent("scout".to_string()));
    }

    #[tokio::test]
    async fn unreachable_catalog_falls_back_to_builtins() {
        let server = spawn_mock_server(Vec::new()).await;
        let client = ApiClient::with_client(test_http_client(), &server.base_url);
        let store = catalog_store(&client).await;

        assert_eq!(store.all_agents().count(), predefined_agents().len());
        assert_eq!(store.all_teams().count(), predefined_teams().len());
    }
}
