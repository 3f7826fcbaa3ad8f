use serde_json::json;

use super::descriptor::param;
use super::{Controller, EndpointDescriptor, shape};
use crate::client::HttpMethod;

pub(super) fn endpoints() -> Vec<EndpointDescriptor> {
    let c = Controller::Profile;
    vec![
        EndpointDescriptor::new(
            "fetch_profile",
            c,
            HttpMethod::Post,
            "/chat/fetchProfile/{instance}",
            "Get the public profile of a number",
        )
        .with_params(json!({ "number": param::number_field() }), &["number"])
        .with_shaper(shape::acknowledged),
        EndpointDescriptor::new(
            "update_profile_name",
            c,
            HttpMethod::Post,
            "/chat/updateProfileName/{instance}",
            "Change the display name of the instance",
        )
        .with_params(json!({ "name": param::required_string("New display name") }), &["name"])
        .with_shaper(shape::acknowledged),
        EndpointDescriptor::new(
            "update_profile_status",
            c,
            HttpMethod::Post,
            "/chat/updateProfileStatus/{instance}",
            "Change the status text of the instance",
        )
        .with_params(json!({ "status": param::string("New status text") }), &["status"])
        .with_shaper(shape::acknowledged),
        EndpointDescriptor::new(
            "update_profile_picture",
            c,
            HttpMethod::Post,
            "/chat/updateProfilePicture/{instance}",
            "Change the profile picture of the instance",
        )
        .with_params(json!({ "picture": param::required_string("Image URL or base64 content") }), &["picture"])
        .with_shaper(shape::acknowledged),
        EndpointDescriptor::new(
            "fetch_privacy_settings",
            c,
            HttpMethod::Get,
            "/chat/fetchPrivacySettings/{instance}",
            "Get the privacy settings of the instance",
        )
        .with_shaper(shape::acknowledged),
    ]
}
