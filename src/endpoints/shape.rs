//! Success-payload shaping shared by endpoint descriptors

use serde_json::{Value, json};

fn param<'a>(params: &'a Value, name: &str) -> &'a Value {
    params.get(name).unwrap_or(&Value::Null)
}

/// Sent messages: echo the recipient and surface the message id
pub fn sent_message(params: &Value, body: Value) -> Value {
    json!({
        "instance": param(params, "instance"),
        "number": param(params, "number"),
        "messageId": body.pointer("/key/id").cloned().unwrap_or(Value::Null),
        "status": body.get("status").cloned().unwrap_or(Value::Null),
        "response": body
    })
}

/// List responses: count plus items
pub fn listing(_params: &Value, body: Value) -> Value {
    let count = match &body {
        Value::Array(items) => items.len(),
        Value::Null => 0,
        _ => 1,
    };
    json!({ "count": count, "items": body })
}

/// QR code / pairing code for connecting an instance
pub fn connection(params: &Value, body: Value) -> Value {
    json!({
        "instance": param(params, "instance"),
        "pairingCode": body.get("pairingCode").cloned().unwrap_or(Value::Null),
        "code": body.get("code").cloned().unwrap_or(Value::Null),
        "qrcode": body.get("base64").cloned().unwrap_or(Value::Null),
        "response": body
    })
}

/// Connection state of an instance
pub fn connection_state(params: &Value, body: Value) -> Value {
    let state = body
        .pointer("/instance/state")
        .or_else(|| body.get("state"))
        .cloned()
        .unwrap_or(Value::Null);
    let connected = state == "open";
    json!({
        "instance": param(params, "instance"),
        "state": state,
        "connected": connected,
        "response": body
    })
}

/// Newly created instance
pub fn created_instance(params: &Value, body: Value) -> Value {
    json!({
        "instanceName": body
            .pointer("/instance/instanceName")
            .cloned()
            .unwrap_or_else(|| param(params, "instanceName").clone()),
        "status": body.pointer("/instance/status").cloned().unwrap_or(Value::Null),
        "hash": body.get("hash").cloned().unwrap_or(Value::Null),
        "response": body
    })
}

/// WhatsApp number check: how many of the submitted numbers exist
pub fn number_check(params: &Value, body: Value) -> Value {
    let checked = param(params, "numbers").as_array().map(Vec::len).unwrap_or(0);
    let on_whatsapp = body
        .as_array()
        .map(|items| items.iter().filter(|i| i.get("exists") == Some(&Value::Bool(true))).count())
        .unwrap_or(0);
    json!({
        "checked": checked,
        "onWhatsApp": on_whatsapp,
        "results": body
    })
}

/// Instance-scoped acknowledgement
pub fn acknowledged(params: &Value, body: Value) -> Value {
    json!({
        "instance": param(params, "instance"),
        "response": body
    })
}

/// Group operations: echo the group JID
pub fn group(params: &Value, body: Value) -> Value {
    json!({
        "instance": param(params, "instance"),
        "groupJid": body
            .get("id")
            .cloned()
            .unwrap_or_else(|| param(params, "groupJid").clone()),
        "response": body
    })
}
