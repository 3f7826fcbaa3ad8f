use serde_json::json;

use super::descriptor::param;
use super::{Controller, EndpointDescriptor, shape};
use crate::client::HttpMethod;

pub(super) fn endpoints() -> Vec<EndpointDescriptor> {
    let c = Controller::Label;
    vec![
        EndpointDescriptor::new(
            "find_labels",
            c,
            HttpMethod::Get,
            "/label/findLabels/{instance}",
            "List the chat labels of a WhatsApp Business instance",
        )
        .with_shaper(shape::listing),
        EndpointDescriptor::new(
            "handle_label",
            c,
            HttpMethod::Post,
            "/label/handleLabel/{instance}",
            "Add a label to or remove it from a chat",
        )
        .with_params(
            json!({
                "number": param::number_field(),
                "labelId": param::required_string("Label id"),
                "action": param::one_of(&["add", "remove"], "Whether to add or remove the label")
            }),
            &["number", "labelId", "action"],
        )
        .with_shaper(shape::acknowledged),
    ]
}
