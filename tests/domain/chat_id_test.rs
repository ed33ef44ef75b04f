use neechat::domain::ChatId;

#[test]
fn given_padded_id_when_parsing_then_kept_verbatim() {
    let id = ChatId::parse(" 3f1c-uuid").unwrap();
    assert_eq!(id.as_str(), " 3f1c-uuid");
    assert_ne!(id, ChatId::new("3f1c-uuid"));
}

#[test]
fn given_blank_id_when_parsing_then_rejected() {
    assert!(ChatId::parse("").is_err());
    assert!(ChatId::parse("   ").is_err());
}

#[test]
fn given_chat_id_when_serialized_then_is_plain_string() {
    let json = serde_json::to_string(&ChatId::new("abc")).unwrap();
    assert_eq!(json, r#""abc""#);
}
