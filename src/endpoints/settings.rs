use serde_json::json;

use super::descriptor::param;
use super::{Controller, EndpointDescriptor, shape};
use crate::client::HttpMethod;

pub(super) fn endpoints() -> Vec<EndpointDescriptor> {
    let c = Controller::Settings;
    vec![
        EndpointDescriptor::new(
            "set_settings",
            c,
            HttpMethod::Post,
            "/settings/set/{instance}",
            "Change behaviour settings of an instance",
        )
        .with_params(
            json!({
                "rejectCall": param::boolean("Reject incoming calls"),
                "msgCall": param::string("Message sent when a call is rejected"),
                "groupsIgnore": param::boolean("Ignore group messages"),
                "alwaysOnline": param::boolean("Stay online permanently"),
                "readMessages": param::boolean("Mark incoming messages as read"),
                "readStatus": param::boolean("Mark status updates as seen"),
                "syncFullHistory": param::boolean("Sync the full history on connect")
            }),
            &["rejectCall", "groupsIgnore", "alwaysOnline", "readMessages", "readStatus", "syncFullHistory"],
        )
        .with_shaper(shape::acknowledged),
        EndpointDescriptor::new(
            "find_settings",
            c,
            HttpMethod::Get,
            "/settings/find/{instance}",
            "Get the behaviour settings of an instance",
        )
        .with_shaper(shape::acknowledged),
    ]
}
