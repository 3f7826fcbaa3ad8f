use serde_json::json;

use super::descriptor::param;
use super::{Controller, EndpointDescriptor, shape};
use crate::client::HttpMethod;

pub(super) fn endpoints() -> Vec<EndpointDescriptor> {
    let c = Controller::Chat;
    vec![
        EndpointDescriptor::new(
            "check_whatsapp_numbers",
            c,
            HttpMethod::Post,
            "/chat/whatsappNumbers/{instance}",
            "Check which phone numbers have a WhatsApp account",
        )
        .with_params(json!({ "numbers": param::string_list("Numbers to check") }), &["numbers"])
        .with_example(json!({ "instance": "sales", "numbers": ["5511999999999"] }))
        .with_shaper(shape::number_check),
        EndpointDescriptor::new(
            "mark_message_as_read",
            c,
            HttpMethod::Post,
            "/chat/markMessageAsRead/{instance}",
            "Mark messages as read",
        )
        .with_params(
            json!({ "readMessages": param::list_of(param::message_key(), "Messages to mark") }),
            &["readMessages"],
        )
        .with_shaper(shape::acknowledged),
        EndpointDescriptor::new(
            "archive_chat",
            c,
            HttpMethod::Post,
            "/chat/archiveChat/{instance}",
            "Archive or unarchive a chat",
        )
        .with_params(
            json!({
                "chat": param::required_string("Chat JID"),
                "archive": param::boolean("true to archive, false to unarchive"),
                "lastMessage": param::object(
                    json!({ "key": param::message_key() }),
                    &["key"],
                    "Most recent message in the chat"
                )
            }),
            &["chat", "archive", "lastMessage"],
        )
        .with_shaper(shape::acknowledged),
        EndpointDescriptor::new(
            "delete_message_for_everyone",
            c,
            HttpMethod::Delete,
            "/chat/deleteMessageForEveryone/{instance}",
            "Delete a sent message for every participant",
        )
        .with_params(
            json!({
                "id": param::required_string("Message id"),
                "remoteJid": param::required_string("Chat JID"),
                "fromMe": param::boolean("Whether this instance sent the message"),
                "participant": param::string("Sender JID in group chats")
            }),
            &["id", "remoteJid", "fromMe"],
        )
        .with_shaper(shape::acknowledged),
        EndpointDescriptor::new(
            "send_presence",
            c,
            HttpMethod::Post,
            "/chat/sendPresence/{instance}",
            "Show typing or recording presence in a chat",
        )
        .with_params(
            json!({
                "number": param::number_field(),
                "presence": param::one_of(&["composing", "recording", "paused"], "Presence to show"),
                "delay": param::integer("How long to show the presence, in milliseconds")
            }),
            &["number", "presence", "delay"],
        )
        .with_shaper(shape::acknowledged),
        EndpointDescriptor::new(
            "fetch_profile_picture_url",
            c,
            HttpMethod::Post,
            "/chat/fetchProfilePictureUrl/{instance}",
            "Get the profile picture URL of a contact",
        )
        .with_params(json!({ "number": param::number_field() }), &["number"])
        .with_shaper(shape::acknowledged),
        EndpointDescriptor::new(
            "find_contacts",
            c,
            HttpMethod::Post,
            "/chat/findContacts/{instance}",
            "Search saved contacts",
        )
        .with_params(
            json!({ "where": param::object(json!({ "id": param::string("Contact JID") }), &[], "Filter") }),
            &[],
        )
        .with_shaper(shape::listing),
        EndpointDescriptor::new(
            "find_messages",
            c,
            HttpMethod::Post,
            "/chat/findMessages/{instance}",
            "Search stored messages of a chat",
        )
        .with_params(
            json!({
                "where": param::object(
                    json!({
                        "key": param::object(
                            json!({ "remoteJid": param::required_string("Chat JID") }),
                            &["remoteJid"],
                            "Message key filter"
                        )
                    }),
                    &["key"],
                    "Filter"
                ),
                "page": param::integer("Page number, starting at 1"),
                "offset": param::integer("Page size")
            }),
            &["where"],
        )
        .with_shaper(shape::acknowledged),
        EndpointDescriptor::new(
            "find_chats",
            c,
            HttpMethod::Post,
            "/chat/findChats/{instance}",
            "List the chats of an instance",
        )
        .with_example(json!({ "instance": "sales" }))
        .with_shaper(shape::listing),
    ]
}
