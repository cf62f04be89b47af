use ankifind::cli::args::{Args, Command};
use clap::Parser;

#[test]
fn given_no_subcommand_when_parsing_then_fails() {
    // Arrange
    let args = vec!["ankifind", "mitochondria"];

    // Act & Assert
    let result = Args::try_parse_from(args);
    assert!(result.is_err(), "Should fail without subcommand");
}

#[test]
fn given_search_command_when_parsing_then_succeeds_with_defaults() {
    // Arrange
    let args = vec!["ankifind", "search", "cell wall"];

    // Act
    let parsed = Args::try_parse_from(args).unwrap();

    // Assert
    match parsed.command {
        Command::Search {
            text,
            profile,
            json,
            html,
        } => {
            assert_eq!(text, "cell wall");
            assert_eq!(profile, None);
            assert!(!json);
            assert!(!html);
        }
        _ => panic!("Expected Search command"),
    }
    assert_eq!(parsed.config, None);
    assert_eq!(parsed.endpoint, None);
}

#[test]
fn given_profile_and_json_flags_when_parsing_search_then_sets_them() {
    // Arrange
    let args = vec!["ankifind", "search", "-p", "bio", "--json", "atp"];

    // Act
    let parsed = Args::try_parse_from(args).unwrap();

    // Assert
    match parsed.command {
        Command::Search {
            text,
            profile,
            json,
            ..
        } => {
            assert_eq!(text, "atp");
            assert_eq!(profile, Some("bio".to_string()));
            assert!(json);
        }
        _ => panic!("Expected Search command"),
    }
}

#[test]
fn given_json_and_html_flags_when_parsing_search_then_fails() {
    let args = vec!["ankifind", "search", "--json", "--html", "atp"];

    assert!(Args::try_parse_from(args).is_err());
}

#[test]
fn given_open_command_when_parsing_then_succeeds() {
    // Arrange
    let args = vec!["ankifind", "open", "1234567890"];

    // Act
    let parsed = Args::try_parse_from(args).unwrap();

    // Assert
    match parsed.command {
        Command::Open { card_id } => assert_eq!(card_id, 1234567890),
        _ => panic!("Expected Open command"),
    }
}

#[test]
fn given_non_numeric_card_id_when_parsing_open_then_fails() {
    let args = vec!["ankifind", "open", "abc"];

    assert!(Args::try_parse_from(args).is_err());
}

#[test]
fn given_global_endpoint_flag_after_subcommand_when_parsing_then_succeeds() {
    // Arrange - global flags work anywhere when marked as global
    let args = vec!["ankifind", "decks", "-e", "http://127.0.0.1:8766"];

    // Act
    let parsed = Args::try_parse_from(args).unwrap();

    // Assert
    assert!(matches!(parsed.command, Command::Decks));
    assert_eq!(parsed.endpoint, Some("http://127.0.0.1:8766".to_string()));
}

#[test]
fn given_global_config_flag_when_parsing_then_succeeds() {
    // Arrange
    let args = vec!["ankifind", "-c", "/tmp/ankifind.toml", "profiles"];

    // Act
    let parsed = Args::try_parse_from(args).unwrap();

    // Assert
    assert!(matches!(parsed.command, Command::Profiles));
    assert_eq!(
        parsed.config,
        Some(std::path::PathBuf::from("/tmp/ankifind.toml"))
    );
}

#[test]
fn given_fields_command_when_parsing_then_takes_model_name() {
    let args = vec!["ankifind", "fields", "Basic (and reversed card)"];

    let parsed = Args::try_parse_from(args).unwrap();

    match parsed.command {
        Command::Fields { model } => assert_eq!(model, "Basic (and reversed card)"),
        _ => panic!("Expected Fields command"),
    }
}

#[test]
fn given_query_command_when_parsing_then_succeeds() {
    let args = vec!["ankifind", "query", "atp", "--profile", "bio"];

    let parsed = Args::try_parse_from(args).unwrap();

    match parsed.command {
        Command::Query { text, profile } => {
            assert_eq!(text, "atp");
            assert_eq!(profile, Some("bio".to_string()));
        }
        _ => panic!("Expected Query command"),
    }
}

#[test]
fn given_init_with_force_when_parsing_then_force_is_true() {
    let parsed = Args::try_parse_from(vec!["ankifind", "init", "--force"]).unwrap();

    assert!(matches!(parsed.command, Command::Init { force: true }));
}

#[test]
fn given_verbose_flag_when_parsing_then_increments_count() {
    // Arrange
    let args = vec!["ankifind", "-vv", "models"];

    // Act
    let parsed = Args::try_parse_from(args).unwrap();

    // Assert
    assert_eq!(parsed.verbose, 2);
}

#[test]
fn given_status_command_when_parsing_then_succeeds() {
    let parsed = Args::try_parse_from(vec!["ankifind", "status"]).unwrap();

    assert!(matches!(parsed.command, Command::Status));
}
