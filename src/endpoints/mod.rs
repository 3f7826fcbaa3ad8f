//! Declarative Evolution API endpoint catalog
//!
//! Each controller module lists its endpoints as [`EndpointDescriptor`]s.
//! [`EndpointCatalog::standard`] collects them into the fixed set the tool
//! generator works from.

mod catalog;
mod chat;
mod descriptor;
mod group;
mod instance;
mod label;
mod message;
mod profile;
mod settings;
pub mod shape;
mod webhook;

pub use catalog::EndpointCatalog;
pub use descriptor::{EndpointDescriptor, INSTANCE_PARAM, INSTANCE_PLACEHOLDER, Shaper, param, placeholders};

use serde::{Deserialize, Serialize};

/// Controller group partitioning endpoints and tools
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Controller {
    Instance,
    Message,
    Chat,
    Group,
    Profile,
    Webhook,
    Settings,
    Label,
}

impl Controller {
    /// Every controller, in catalog order
    pub const ALL: [Controller; 8] = [
        Controller::Instance,
        Controller::Message,
        Controller::Chat,
        Controller::Group,
        Controller::Profile,
        Controller::Webhook,
        Controller::Settings,
        Controller::Label,
    ];

    /// Parse from string representation
    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "instance" => Some(Self::Instance),
            "message" => Some(Self::Message),
            "chat" => Some(Self::Chat),
            "group" => Some(Self::Group),
            "profile" => Some(Self::Profile),
            "webhook" => Some(Self::Webhook),
            "settings" => Some(Self::Settings),
            "label" => Some(Self::Label),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Instance => "instance",
            Self::Message => "message",
            Self::Chat => "chat",
            Self::Group => "group",
            Self::Profile => "profile",
            Self::Webhook => "webhook",
            Self::Settings => "settings",
            Self::Label => "label",
        }
    }

    /// Descriptors belonging to this controller
    pub fn endpoints(&self) -> Vec<EndpointDescriptor> {
        match self {
            Self::Instance => instance::endpoints(),
            Self::Message => message::endpoints(),
            Self::Chat => chat::endpoints(),
            Self::Group => group::endpoints(),
            Self::Profile => profile::endpoints(),
            Self::Webhook => webhook::endpoints(),
            Self::Settings => settings::endpoints(),
            Self::Label => label::endpoints(),
        }
    }
}

impl std::fmt::Display for Controller {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
