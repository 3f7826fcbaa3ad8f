use serde_json::json;

use super::descriptor::param;
use super::{Controller, EndpointDescriptor, shape};
use crate::client::HttpMethod;

pub(super) fn endpoints() -> Vec<EndpointDescriptor> {
    let c = Controller::Message;
    vec![
        EndpointDescriptor::new(
            "send_text_message",
            c,
            HttpMethod::Post,
            "/message/sendText/{instance}",
            "Send a text message to a contact or group",
        )
        .with_params(
            json!({
                "number": param::number_field(),
                "text": param::required_string("Message text"),
                "delay": param::integer("Delay in milliseconds before sending"),
                "linkPreview": param::boolean("Render a preview for the first link")
            }),
            &["number", "text"],
        )
        .with_example(json!({ "instance": "sales", "number": "5511999999999", "text": "Hello!" }))
        .with_shaper(shape::sent_message),
        EndpointDescriptor::new(
            "send_media_message",
            c,
            HttpMethod::Post,
            "/message/sendMedia/{instance}",
            "Send an image, video or document by URL or base64",
        )
        .with_params(
            json!({
                "number": param::number_field(),
                "mediatype": param::one_of(&["image", "video", "document"], "Kind of media"),
                "media": param::required_string("Media URL or base64 content"),
                "mimetype": param::string("MIME type, e.g. image/png"),
                "caption": param::string("Caption shown under the media"),
                "fileName": param::string("File name for documents"),
                "delay": param::integer("Delay in milliseconds before sending")
            }),
            &["number", "mediatype", "media"],
        )
        .with_example(json!({
            "instance": "sales",
            "number": "5511999999999",
            "mediatype": "image",
            "media": "https://example.com/catalog.png",
            "caption": "New catalog"
        }))
        .with_shaper(shape::sent_message),
        EndpointDescriptor::new(
            "send_audio_message",
            c,
            HttpMethod::Post,
            "/message/sendWhatsAppAudio/{instance}",
            "Send a voice note",
        )
        .with_params(
            json!({
                "number": param::number_field(),
                "audio": param::required_string("Audio URL or base64 content"),
                "delay": param::integer("Delay in milliseconds before sending")
            }),
            &["number", "audio"],
        )
        .with_example(json!({ "instance": "sales", "number": "5511999999999", "audio": "https://example.com/note.ogg" }))
        .with_shaper(shape::sent_message),
        EndpointDescriptor::new(
            "send_sticker_message",
            c,
            HttpMethod::Post,
            "/message/sendSticker/{instance}",
            "Send a sticker",
        )
        .with_params(
            json!({
                "number": param::number_field(),
                "sticker": param::required_string("Sticker URL or base64 content")
            }),
            &["number", "sticker"],
        )
        .with_shaper(shape::sent_message),
        EndpointDescriptor::new(
            "send_location_message",
            c,
            HttpMethod::Post,
            "/message/sendLocation/{instance}",
            "Send a location pin",
        )
        .with_params(
            json!({
                "number": param::number_field(),
                "latitude": param::number("Latitude in decimal degrees"),
                "longitude": param::number("Longitude in decimal degrees"),
                "name": param::string("Place name"),
                "address": param::string("Street address")
            }),
            &["number", "latitude", "longitude"],
        )
        .with_example(json!({
            "instance": "sales",
            "number": "5511999999999",
            "latitude": -23.5505,
            "longitude": -46.6333,
            "name": "Store"
        }))
        .with_shaper(shape::sent_message),
        EndpointDescriptor::new(
            "send_contact_message",
            c,
            HttpMethod::Post,
            "/message/sendContact/{instance}",
            "Share one or more contact cards",
        )
        .with_params(
            json!({
                "number": param::number_field(),
                "contact": param::list_of(
                    param::object(
                        json!({
                            "fullName": param::required_string("Contact display name"),
                            "wuid": param::string("WhatsApp id of the contact"),
                            "phoneNumber": param::required_string("Contact phone number"),
                            "organization": param::string("Company name"),
                            "email": param::string("Email address")
                        }),
                        &["fullName", "phoneNumber"],
                        "Contact card",
                    ),
                    "Contacts to share"
                )
            }),
            &["number", "contact"],
        )
        .with_shaper(shape::sent_message),
        EndpointDescriptor::new(
            "send_reaction_message",
            c,
            HttpMethod::Post,
            "/message/sendReaction/{instance}",
            "React to a message with an emoji (empty string removes the reaction)",
        )
        .with_params(
            json!({
                "key": param::message_key(),
                "reaction": param::string("Emoji to react with")
            }),
            &["key", "reaction"],
        )
        .with_shaper(shape::acknowledged),
        EndpointDescriptor::new(
            "send_poll_message",
            c,
            HttpMethod::Post,
            "/message/sendPoll/{instance}",
            "Send a poll",
        )
        .with_params(
            json!({
                "number": param::number_field(),
                "name": param::required_string("Poll question"),
                "selectableCount": param::integer("How many options a voter may pick"),
                "values": param::string_list("Poll options")
            }),
            &["number", "name", "values"],
        )
        .with_example(json!({
            "instance": "sales",
            "number": "5511999999999",
            "name": "Best day for delivery?",
            "selectableCount": 1,
            "values": ["Monday", "Friday"]
        }))
        .with_shaper(shape::sent_message),
    ]
}
