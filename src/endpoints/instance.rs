use serde_json::json;

use super::descriptor::param;
use super::{Controller, EndpointDescriptor, shape};
use crate::client::HttpMethod;

pub(super) fn endpoints() -> Vec<EndpointDescriptor> {
    let c = Controller::Instance;
    vec![
        EndpointDescriptor::new(
            "create_instance",
            c,
            HttpMethod::Post,
            "/instance/create",
            "Create a new WhatsApp instance on the Evolution server",
        )
        .with_params(
            json!({
                "instanceName": param::required_string("Unique name for the new instance"),
                "token": param::string("Optional API token for the instance"),
                "qrcode": param::boolean("Return a QR code immediately"),
                "number": param::string("Phone number to pair with (enables pairing code)"),
                "integration": param::one_of(&["WHATSAPP-BAILEYS", "WHATSAPP-BUSINESS"], "Connection backend")
            }),
            &["instanceName"],
        )
        .with_example(json!({ "instanceName": "sales", "qrcode": true, "integration": "WHATSAPP-BAILEYS" }))
        .with_shaper(shape::created_instance),
        EndpointDescriptor::new(
            "fetch_instances",
            c,
            HttpMethod::Get,
            "/instance/fetchInstances",
            "List instances, optionally filtered by name or id",
        )
        .with_params(
            json!({
                "instanceName": param::string("Only return the instance with this name"),
                "instanceId": param::string("Only return the instance with this id")
            }),
            &[],
        )
        .with_example(json!({}))
        .with_shaper(shape::listing),
        EndpointDescriptor::new(
            "connect_instance",
            c,
            HttpMethod::Get,
            "/instance/connect/{instance}",
            "Connect an instance and obtain its QR code or pairing code",
        )
        .with_params(
            json!({ "number": param::string("Phone number for pairing-code login") }),
            &[],
        )
        .with_example(json!({ "instance": "sales" }))
        .with_shaper(shape::connection),
        EndpointDescriptor::new(
            "restart_instance",
            c,
            HttpMethod::Post,
            "/instance/restart/{instance}",
            "Restart an instance",
        )
        .with_example(json!({ "instance": "sales" }))
        .with_shaper(shape::acknowledged),
        EndpointDescriptor::new(
            "get_connection_state",
            c,
            HttpMethod::Get,
            "/instance/connectionState/{instance}",
            "Get the connection state of an instance",
        )
        .with_example(json!({ "instance": "sales" }))
        .with_shaper(shape::connection_state),
        EndpointDescriptor::new(
            "logout_instance",
            c,
            HttpMethod::Delete,
            "/instance/logout/{instance}",
            "Log an instance out of WhatsApp",
        )
        .with_example(json!({ "instance": "sales" }))
        .with_shaper(shape::acknowledged),
        EndpointDescriptor::new(
            "delete_instance",
            c,
            HttpMethod::Delete,
            "/instance/delete/{instance}",
            "Delete an instance from the server",
        )
        .with_example(json!({ "instance": "sales" }))
        .with_shaper(shape::acknowledged),
        EndpointDescriptor::new(
            "set_presence",
            c,
            HttpMethod::Post,
            "/instance/setPresence/{instance}",
            "Set the global presence of an instance",
        )
        .with_params(
            json!({ "presence": param::one_of(&["available", "unavailable"], "Presence to advertise") }),
            &["presence"],
        )
        .with_example(json!({ "instance": "sales", "presence": "available" }))
        .with_shaper(shape::acknowledged),
    ]
}
