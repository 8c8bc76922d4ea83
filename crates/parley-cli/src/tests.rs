use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

use clap::Parser;
use parley_core::attachments::{AttachmentKind, AttachmentPreview};
use parley_core::config::DEFAULT_BASE_URL;
use parley_core::{Conversation, ConversationId, Role};
use pretty_assertions::assert_eq;

use crate::cli::{Cli, Commands, CompletionShell};
use crate::commands::chat::{parse_chat_command, ChatCommand};
use crate::commands::common::{
    format_conversation_lines, format_size, join_words, parse_conversation_id, select_base_url,
    BaseUrlSource, ConnectionArgs,
};
use crate::commands::completions::run_completions;
use crate::commands::config::normalize_profile_base_url;
use crate::commands::send::run_send;
use crate::commands::show::run_show;
use crate::error::CliError;
use crate::presenter::{is_affirmative, render_entry, render_preview, render_title};

fn unique_temp_path(stem: &str, extension: &str) -> PathBuf {
    std::env::temp_dir().join(format!(
        "{stem}-{}.{extension}",
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map_or(0, |duration| duration.as_nanos())
    ))
}

#[test]
fn base_url_prefers_flag_then_env_then_profile() {
    let (url, source) = select_base_url(
        Some("http://flag:1/".to_string()),
        Some("http://env:2".to_string()),
        Some("http://profile:3".to_string()),
    )
    .unwrap();
    assert_eq!((url.as_str(), source), ("http://flag:1", BaseUrlSource::Flag));

    let (url, source) = select_base_url(
        Some("  ".to_string()),
        Some("http://env:2".to_string()),
        Some("http://profile:3".to_string()),
    )
    .unwrap();
    assert_eq!((url.as_str(), source), ("http://env:2", BaseUrlSource::Environment));

    let (url, source) =
        select_base_url(None, None, Some("http://profile:3".to_string())).unwrap();
    assert_eq!((url.as_str(), source), ("http://profile:3", BaseUrlSource::Profile));

    let (url, source) = select_base_url(None, None, None).unwrap();
    assert_eq!((url.as_str(), source), (DEFAULT_BASE_URL, BaseUrlSource::Default));
}

#[test]
fn base_url_requires_http_scheme() {
    let error = select_base_url(Some("localhost:5001".to_string()), None, None).unwrap_err();
    assert!(matches!(error, CliError::Config(message) if message.contains("--base-url")));
}

#[test]
fn profile_base_url_is_validated() {
    assert_eq!(
        normalize_profile_base_url(Some(" https://chat.example.com/ ".to_string())).unwrap(),
        Some("https://chat.example.com".to_string())
    );
    assert_eq!(normalize_profile_base_url(Some(" ".to_string())).unwrap(), None);
    assert!(normalize_profile_base_url(Some("ftp://chat".to_string())).is_err());
}

#[test]
fn conversation_ids_must_be_integers() {
    assert_eq!(parse_conversation_id(" 42 ").unwrap(), ConversationId::new(42));
    assert!(matches!(
        parse_conversation_id("abc"),
        Err(CliError::InvalidConversationId(raw)) if raw == "abc"
    ));
}

#[test]
fn join_words_trims_joined_text() {
    assert_eq!(
        join_words(&["hello".to_string(), "there ".to_string()]),
        "hello there"
    );
    assert_eq!(join_words(&[]), "");
}

#[test]
fn conversation_lines_mark_active() {
    let conversations = vec![Conversation::new(12, "Trip plans"), Conversation::new(3, "Recipes")];
    assert_eq!(
        format_conversation_lines(&conversations, Some(ConversationId::new(3))),
        vec![
            "      12  Trip plans".to_string(),
            "*      3  Recipes".to_string()
        ]
    );
}

#[test]
fn sizes_are_human_readable() {
    assert_eq!(format_size(512), "512 B");
    assert_eq!(format_size(2048), "2.0 KB");
    assert_eq!(format_size(10 * 1024 * 1024), "10.0 MB");
}

#[test]
fn plain_lines_are_messages() {
    assert_eq!(
        parse_chat_command("  hello /there  "),
        ChatCommand::Send("hello /there".to_string())
    );
    assert_eq!(parse_chat_command(""), ChatCommand::Send(String::new()));
}

#[test]
fn slash_commands_parse_arguments() {
    assert_eq!(parse_chat_command("/new"), ChatCommand::New);
    assert_eq!(parse_chat_command("/open 7"), ChatCommand::Open("7".to_string()));
    assert_eq!(
        parse_chat_command("/rename 7  Weekend   trip "),
        ChatCommand::Rename {
            id: "7".to_string(),
            title: "Weekend   trip".to_string()
        }
    );
    assert_eq!(
        parse_chat_command("/attach a.png  notes.txt"),
        ChatCommand::Attach(vec![PathBuf::from("a.png"), PathBuf::from("notes.txt")])
    );
    assert_eq!(parse_chat_command("/detach 2"), ChatCommand::Detach("2".to_string()));
    assert_eq!(parse_chat_command("/quit"), ChatCommand::Quit);
}

#[test]
fn slash_commands_without_arguments_show_usage() {
    assert_eq!(parse_chat_command("/open"), ChatCommand::Usage("/open ID"));
    assert_eq!(parse_chat_command("/rename 7"), ChatCommand::Usage("/rename ID TITLE"));
    assert_eq!(parse_chat_command("/attach"), ChatCommand::Usage("/attach PATH..."));
    assert_eq!(
        parse_chat_command("/frobnicate"),
        ChatCommand::Unknown("frobnicate".to_string())
    );
}

#[test]
fn terminal_rendering() {
    assert_eq!(render_entry(Role::User, "hi"), "you> hi");
    assert_eq!(render_entry(Role::Assistant, "hello"), "assistant> hello");
    assert_eq!(render_title(None), "== Parley ==");
    assert_eq!(render_title(Some("Trip")), "== Trip ==");
    assert_eq!(
        render_preview(
            "notes.txt",
            &AttachmentPreview::Icon {
                kind: AttachmentKind::Text
            }
        ),
        "attached notes.txt (text)"
    );
}

#[test]
fn confirmation_answers() {
    assert!(is_affirmative("y\n"));
    assert!(is_affirmative(" YES "));
    assert!(!is_affirmative("\n"));
    assert!(!is_affirmative("nope"));
}

#[test]
fn cli_parses_send_with_attachments() {
    let cli = Cli::try_parse_from([
        "parley",
        "--base-url",
        "http://localhost:9000",
        "send",
        "-c",
        "5",
        "--attach",
        "a.png",
        "--attach",
        "b.txt",
        "what",
        "is",
        "this",
    ])
    .unwrap();

    assert_eq!(cli.base_url.as_deref(), Some("http://localhost:9000"));
    match cli.command {
        Some(Commands::Send {
            conversation,
            attach,
            message,
        }) => {
            assert_eq!(conversation.as_deref(), Some("5"));
            assert_eq!(attach, vec![PathBuf::from("a.png"), PathBuf::from("b.txt")]);
            assert_eq!(message, vec!["what", "is", "this"]);
        }
        _ => panic!("expected send command"),
    }
}

#[test]
fn cli_defaults_to_chat() {
    let cli = Cli::try_parse_from(["parley"]).unwrap();
    assert!(cli.command.is_none());
}

#[test]
fn rename_requires_a_title() {
    assert!(Cli::try_parse_from(["parley", "rename", "3"]).is_err());
}

#[tokio::test(flavor = "current_thread")]
async fn send_without_text_or_files_is_rejected_before_connecting() {
    let connection = ConnectionArgs {
        base_url: Some("http://127.0.0.1:9".to_string()),
        profile: None,
    };
    let error = run_send(&connection, None, &[], &["  ".to_string()])
        .await
        .unwrap_err();
    assert!(matches!(error, CliError::EmptyMessage));
}

#[tokio::test(flavor = "current_thread")]
async fn send_with_missing_attachment_is_rejected() {
    let connection = ConnectionArgs {
        base_url: Some("http://127.0.0.1:9".to_string()),
        profile: None,
    };
    let missing = unique_temp_path("parley-missing-attachment", "txt");
    let error = run_send(&connection, None, &[missing], &["hi".to_string()])
        .await
        .unwrap_err();
    assert!(matches!(error, CliError::Attachment { .. }));
}

#[tokio::test(flavor = "current_thread")]
async fn show_rejects_non_numeric_id() {
    let error = run_show(&ConnectionArgs::default(), "latest", false)
        .await
        .unwrap_err();
    assert!(matches!(error, CliError::InvalidConversationId(_)));
}

#[test]
fn reported_errors_are_not_printed_again() {
    assert!(CliError::Reported.already_reported());
    assert!(!CliError::EmptyMessage.already_reported());
}

#[test]
fn run_completions_writes_bash_script_file() {
    let output_path = unique_temp_path("parley-completions-test", "bash");

    run_completions(CompletionShell::Bash, Some(&output_path)).unwrap();

    let script = std::fs::read_to_string(&output_path).unwrap();
    assert!(script.contains("_parley()"));
    assert!(script.contains("complete -F _parley"));

    let _ = std::fs::remove_file(output_path);
}
