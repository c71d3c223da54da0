use super::SlashCommand;

#[test]
fn it_parse_empty_string() {
    let text = "";
    assert!(SlashCommand::parse(text).is_none());
}
#[test]
fn it_parse_space_only() {
    let text = " ";
    assert!(SlashCommand::parse(text).is_none());
}
#[test]
fn it_parse_single_slash() {
    let text = "/";
    assert!(SlashCommand::parse(text).is_none());
}
#[test]
fn it_parse_plain_text() {
    let text = "I have had a fever since /monday";
    assert!(SlashCommand::parse(text).is_none());
}
#[test]
fn it_parse_valid_prefix() {
    let cmd = SlashCommand::parse("  /q  ");
    assert!(cmd.is_some());
    assert_eq!(cmd.unwrap().command, "/q");
}

#[test]
fn it_is_short_quit() {
    let cmd = SlashCommand::parse("/q").unwrap();
    assert!(cmd.is_quit());
}
#[test]
fn it_is_quit() {
    let cmd = SlashCommand::parse("/quit").unwrap();
    assert!(cmd.is_quit());
}
#[test]
fn it_is_exit() {
    let cmd = SlashCommand::parse("/exit").unwrap();
    assert!(cmd.is_quit());
}
#[test]
fn it_is_not_is_quit() {
    let cmd = SlashCommand::parse("/reset").unwrap();
    assert!(!cmd.is_quit());
}

#[test]
fn it_is_reset() {
    let cmd = SlashCommand::parse("/reset").unwrap();
    assert!(cmd.is_reset());
}
#[test]
fn it_is_clear() {
    let cmd = SlashCommand::parse("/clear").unwrap();
    assert!(cmd.is_reset());
}

#[test]
fn it_is_short_help() {
    let cmd = SlashCommand::parse("/h").unwrap();
    assert!(cmd.is_help());
}
#[test]
fn it_is_help() {
    let cmd = SlashCommand::parse("/help").unwrap();
    assert!(cmd.is_help());
}

#[test]
fn it_is_transcript() {
    let cmd = SlashCommand::parse("/history").unwrap();
    assert!(cmd.is_transcript());
}
#[test]
fn it_matches_commands_followed_by_text() {
    let cmd = SlashCommand::parse("/help me please").unwrap();
    assert!(cmd.is_help());
}
