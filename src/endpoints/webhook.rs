use serde_json::json;

use super::descriptor::param;
use super::{Controller, EndpointDescriptor, shape};
use crate::client::HttpMethod;

pub(super) fn endpoints() -> Vec<EndpointDescriptor> {
    let c = Controller::Webhook;
    vec![
        EndpointDescriptor::new(
            "set_webhook",
            c,
            HttpMethod::Post,
            "/webhook/set/{instance}",
            "Configure the webhook that receives instance events",
        )
        .with_params(
            json!({
                "webhook": param::object(
                    json!({
                        "enabled": param::boolean("Turn delivery on or off"),
                        "url": param::required_string("Receiver URL"),
                        "webhookByEvents": param::boolean("Append the event name to the URL"),
                        "webhookBase64": param::boolean("Send media as base64"),
                        "events": param::string_list("Event names to deliver, e.g. MESSAGES_UPSERT")
                    }),
                    &["enabled", "url"],
                    "Webhook settings"
                )
            }),
            &["webhook"],
        )
        .with_example(json!({
            "instance": "sales",
            "webhook": { "enabled": true, "url": "https://hooks.example.com/evo", "events": ["MESSAGES_UPSERT"] }
        }))
        .with_shaper(shape::acknowledged),
        EndpointDescriptor::new(
            "find_webhook",
            c,
            HttpMethod::Get,
            "/webhook/find/{instance}",
            "Get the webhook configured for an instance",
        )
        .with_shaper(shape::acknowledged),
    ]
}
