//! Tools that let the model read and edit the family calendar.
//!
//! Each tool holds a handle to the same `EventStore`. Missing events
//! are reported to the model as a `not_found` status, never as an
//! error, so it can adapt in its next request.

use anyhow::{Error, Result};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

use crate::calendar::{EventPatch, EventStore, NewEvent};
use crate::openai::{BoxedToolCall, Function, Parameters, Property, ToolCall, ToolType};

fn object_params<Props: Serialize>(properties: Props, required: &[&str]) -> Parameters<Props> {
    Parameters {
        r#type: String::from("object"),
        properties,
        required: required.iter().map(|s| s.to_string()).collect(),
        additional_properties: false,
    }
}

/// All four calendar tools sharing `store`.
pub fn calendar_tools(store: &EventStore) -> Vec<BoxedToolCall> {
    vec![
        Box::new(ListEventsTool::new(store.clone())),
        Box::new(CreateEventTool::new(store.clone())),
        Box::new(UpdateEventTool::new(store.clone())),
        Box::new(DeleteEventTool::new(store.clone())),
    ]
}

#[derive(Serialize)]
pub struct ListEventsProps {
    pub start: Property,
    pub end: Property,
}

#[derive(Deserialize)]
struct ListEventsArgs {
    start: Option<String>,
    end: Option<String>,
}

#[derive(Serialize)]
pub struct ListEventsTool {
    pub r#type: ToolType,
    pub function: Function<ListEventsProps>,
    #[serde(skip)]
    store: EventStore,
}

impl ListEventsTool {
    pub fn new(store: EventStore) -> Self {
        let function = Function {
            name: String::from("listEvents"),
            description: String::from(
                "Hent en liste over begivenheder i kalenderen inden for en given periode.",
            ),
            parameters: object_params(
                ListEventsProps {
                    start: Property::string(
                        "Start dato (ISO 8601 string) e.g., 2023-10-27T10:00:00",
                    ),
                    end: Property::string("Slut dato (ISO 8601 string)"),
                },
                &["start"],
            ),
            strict: false,
        };

        Self {
            r#type: ToolType::Function,
            function,
            store,
        }
    }
}

#[async_trait]
impl ToolCall for ListEventsTool {
    async fn call(&self, args: &str) -> Result<Value, Error> {
        let fn_args: ListEventsArgs = serde_json::from_str(args)?;
        // The range is accepted but the whole calendar is returned
        tracing::debug!(
            "listEvents range {:?} - {:?} not applied",
            fn_args.start,
            fn_args.end
        );
        Ok(json!({ "events": self.store.list() }))
    }

    fn function_name(&self) -> String {
        self.function.name.clone()
    }
}

#[derive(Serialize)]
pub struct CreateEventProps {
    pub summary: Property,
    pub start: Property,
    pub end: Property,
    pub description: Property,
    pub location: Property,
}

#[derive(Serialize)]
pub struct CreateEventTool {
    pub r#type: ToolType,
    pub function: Function<CreateEventProps>,
    #[serde(skip)]
    store: EventStore,
}

impl CreateEventTool {
    pub fn new(store: EventStore) -> Self {
        let function = Function {
            name: String::from("createEvent"),
            description: String::from("Opret en ny begivenhed i kalenderen."),
            parameters: object_params(
                CreateEventProps {
                    summary: Property::string("Titlen på begivenheden"),
                    start: Property::string("Starttidspunkt (ISO 8601)"),
                    end: Property::string("Sluttidspunkt (ISO 8601)"),
                    description: Property::string("Valgfri beskrivelse eller noter"),
                    location: Property::string("Valgfri lokation"),
                },
                &["summary", "start", "end"],
            ),
            strict: false,
        };

        Self {
            r#type: ToolType::Function,
            function,
            store,
        }
    }
}

#[async_trait]
impl ToolCall for CreateEventTool {
    async fn call(&self, args: &str) -> Result<Value, Error> {
        let event: NewEvent = serde_json::from_str(args)?;
        let id = self.store.create(event);
        Ok(json!({ "status": "created", "id": id }))
    }

    fn function_name(&self) -> String {
        self.function.name.clone()
    }
}

#[derive(Serialize)]
pub struct UpdateEventProps {
    pub id: Property,
    pub summary: Property,
    pub start: Property,
    pub end: Property,
    pub description: Property,
    pub location: Property,
}

#[derive(Deserialize)]
struct UpdateEventArgs {
    id: String,
    #[serde(flatten)]
    patch: EventPatch,
}

#[derive(Serialize)]
pub struct UpdateEventTool {
    pub r#type: ToolType,
    pub function: Function<UpdateEventProps>,
    #[serde(skip)]
    store: EventStore,
}

impl UpdateEventTool {
    pub fn new(store: EventStore) -> Self {
        let function = Function {
            name: String::from("updateEvent"),
            description: String::from(
                "Opdater en eksisterende begivenhed. Angiv ID og de felter der skal ændres.",
            ),
            parameters: object_params(
                UpdateEventProps {
                    id: Property::string("ID på begivenheden der skal ændres"),
                    summary: Property::string("Ny titel (valgfri)"),
                    start: Property::string("Ny starttidspunkt (valgfri)"),
                    end: Property::string("Ny sluttidspunkt (valgfri)"),
                    description: Property::string("Ny beskrivelse (valgfri)"),
                    location: Property::string("Ny lokation (valgfri)"),
                },
                &["id"],
            ),
            strict: false,
        };

        Self {
            r#type: ToolType::Function,
            function,
            store,
        }
    }
}

#[async_trait]
impl ToolCall for UpdateEventTool {
    async fn call(&self, args: &str) -> Result<Value, Error> {
        let UpdateEventArgs { id, patch } = serde_json::from_str(args)?;
        let status = if self.store.update(&id, patch) {
            "updated"
        } else {
            "not_found"
        };
        Ok(json!({ "status": status }))
    }

    fn function_name(&self) -> String {
        self.function.name.clone()
    }
}

#[derive(Serialize)]
pub struct DeleteEventProps {
    pub id: Property,
}

#[derive(Deserialize)]
struct DeleteEventArgs {
    id: String,
}

#[derive(Serialize)]
pub struct DeleteEventTool {
    pub r#type: ToolType,
    pub function: Function<DeleteEventProps>,
    #[serde(skip)]
    store: EventStore,
}

impl DeleteEventTool {
    pub fn new(store: EventStore) -> Self {
        let function = Function {
            name: String::from("deleteEvent"),
            description: String::from(
                "Slet en begivenhed baseret på ID. Brug listEvents først for at finde ID, hvis du kun kender titlen.",
            ),
            parameters: object_params(
                DeleteEventProps {
                    id: Property::string("ID på begivenheden der skal slettes"),
                },
                &["id"],
            ),
            strict: false,
        };

        Self {
            r#type: ToolType::Function,
            function,
            store,
        }
    }
}

#[async_trait]
impl ToolCall for DeleteEventTool {
    async fn call(&self, args: &str) -> Result<Value, Error> {
        let DeleteEventArgs { id } = serde_json::from_str(args)?;
        let status = if self.store.delete(&id) {
            "deleted"
        } else {
            "not_found"
        };
        Ok(json!({ "status": status }))
    }

    fn function_name(&self) -> String {
        self.function.name.clone()
    }
}
