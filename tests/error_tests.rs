// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

use civic_reports::error::{validation_message, ClientError};
use reqwest::StatusCode;

#[test]
fn test_from_response_classifies_status() {
    let err = ClientError::from_response(StatusCode::UNAUTHORIZED, "/reports", "");
    assert!(matches!(err, ClientError::Unauthorized));

    let err = ClientError::from_response(StatusCode::NOT_FOUND, "/reports/9", "");
    assert!(err.is_not_found());

    let err = ClientError::from_response(
        StatusCode::UNPROCESSABLE_ENTITY,
        "/users",
        r#"{"property": "email", "message": "E-mail já cadastrado"}"#,
    );
    assert!(matches!(err, ClientError::Validation(ref m) if m == "email: E-mail já cadastrado"));

    let err = ClientError::from_response(
        StatusCode::SERVICE_UNAVAILABLE,
        "/reports",
        r#"{"message": "maintenance"}"#,
    );
    assert!(matches!(err, ClientError::Api { status: 503, ref message } if message == "maintenance"));
}

#[test]
fn test_api_message_falls_back_to_reason() {
    let err = ClientError::from_response(StatusCode::BAD_GATEWAY, "/reports", "<html>");
    match err {
        ClientError::Api { status, message } => {
            assert_eq!(status, 502);
            assert_eq!(message, "Bad Gateway");
        }
        other => panic!("unexpected error {:?}", other),
    }
}

#[test]
fn test_is_retryable() {
    assert!(ClientError::Transport("reset".to_string()).is_retryable());
    assert!(ClientError::Api {
        status: 500,
        message: String::new()
    }
    .is_retryable());
    assert!(!ClientError::Api {
        status: 409,
        message: String::new()
    }
    .is_retryable());
    assert!(!ClientError::Unauthorized.is_retryable());
    assert!(!ClientError::NotFound("/x".to_string()).is_retryable());
}

#[test]
fn test_validation_message_shapes() {
    assert_eq!(validation_message(""), "Requisição inválida.");
    assert_eq!(validation_message("plain text"), "plain text");
    assert_eq!(validation_message(r#""quoted""#), "quoted");
    assert_eq!(
        validation_message(r#"{"email": ["inválido"], "name": "curto"}"#),
        "email: inválido name: curto"
    );
    assert_eq!(validation_message(r#"["a", "b"]"#), "a, b");
}

#[test]
fn test_user_messages_are_portuguese() {
    assert_eq!(
        ClientError::Unauthorized.user_message(),
        "Sessão expirada. Faça login novamente."
    );
    assert_eq!(
        ClientError::Transport("refused".to_string()).user_message(),
        "Não foi possível conectar ao servidor. Tente novamente."
    );
    assert_eq!(
        ClientError::Decode("bad".to_string()).user_message(),
        "Erro inesperado. Tente novamente."
    );
}
