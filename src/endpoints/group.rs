use serde_json::json;

use super::descriptor::param;
use super::{Controller, EndpointDescriptor, shape};
use crate::client::HttpMethod;

fn group_jid() -> serde_json::Value {
    json!({
        "type": "string",
        "minLength": 1,
        "pattern": "^[^/?#&%]+$",
        "not": { "enum": [".", ".."] },
        "description": "Group JID, e.g. 120363295648424210@g.us"
    })
}

pub(super) fn endpoints() -> Vec<EndpointDescriptor> {
    let c = Controller::Group;
    vec![
        EndpointDescriptor::new(
            "create_group",
            c,
            HttpMethod::Post,
            "/group/create/{instance}",
            "Create a group with the given participants",
        )
        .with_params(
            json!({
                "subject": param::required_string("Group name"),
                "description": param::string("Group description"),
                "participants": param::string_list("Participant numbers")
            }),
            &["subject", "participants"],
        )
        .with_example(json!({
            "instance": "sales",
            "subject": "VIP customers",
            "participants": ["5511999999999"]
        }))
        .with_shaper(shape::group),
        EndpointDescriptor::new(
            "update_group_subject",
            c,
            HttpMethod::Post,
            "/group/updateGroupSubject/{instance}?groupJid={groupJid}",
            "Rename a group",
        )
        .with_params(
            json!({ "groupJid": group_jid(), "subject": param::required_string("New group name") }),
            &["groupJid", "subject"],
        )
        .with_shaper(shape::group),
        EndpointDescriptor::new(
            "update_group_description",
            c,
            HttpMethod::Post,
            "/group/updateGroupDescription/{instance}?groupJid={groupJid}",
            "Change a group's description",
        )
        .with_params(
            json!({ "groupJid": group_jid(), "description": param::string("New description") }),
            &["groupJid", "description"],
        )
        .with_shaper(shape::group),
        EndpointDescriptor::new(
            "fetch_all_groups",
            c,
            HttpMethod::Get,
            "/group/fetchAllGroups/{instance}",
            "List every group the instance belongs to",
        )
        .with_params(
            json!({ "getParticipants": param::boolean("Include participant lists") }),
            &["getParticipants"],
        )
        .with_example(json!({ "instance": "sales", "getParticipants": false }))
        .with_shaper(shape::listing),
        EndpointDescriptor::new(
            "find_group_info",
            c,
            HttpMethod::Get,
            "/group/findGroupInfos/{instance}",
            "Get metadata of one group",
        )
        .with_params(json!({ "groupJid": group_jid() }), &["groupJid"])
        .with_shaper(shape::group),
        EndpointDescriptor::new(
            "find_group_participants",
            c,
            HttpMethod::Get,
            "/group/participants/{instance}",
            "List the participants of a group",
        )
        .with_params(json!({ "groupJid": group_jid() }), &["groupJid"])
        .with_shaper(shape::group),
        EndpointDescriptor::new(
            "update_group_participants",
            c,
            HttpMethod::Post,
            "/group/updateParticipant/{instance}?groupJid={groupJid}",
            "Add, remove, promote or demote group participants",
        )
        .with_params(
            json!({
                "groupJid": group_jid(),
                "action": param::one_of(&["add", "remove", "promote", "demote"], "Change to apply"),
                "participants": param::string_list("Participant numbers")
            }),
            &["groupJid", "action", "participants"],
        )
        .with_shaper(shape::group),
        EndpointDescriptor::new(
            "fetch_invite_code",
            c,
            HttpMethod::Get,
            "/group/inviteCode/{instance}",
            "Get the invite link of a group",
        )
        .with_params(json!({ "groupJid": group_jid() }), &["groupJid"])
        .with_shaper(shape::group),
        EndpointDescriptor::new(
            "leave_group",
            c,
            HttpMethod::Delete,
            "/group/leaveGroup/{instance}?groupJid={groupJid}",
            "Leave a group",
        )
        .with_params(json!({ "groupJid": group_jid() }), &["groupJid"])
        .with_shaper(shape::group),
    ]
}
