//! Built-in sample diagrams offered by the "generate sample" control.

/// A named sample diagram.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Sample {
    /// Login flow: process → check → decision → grant/deny. Loaded at startup.
    #[default]
    Auth,
    /// Request handling: input → validate → process/error → success.
    Request,
}

impl Sample {
    pub const ALL: [Self; 2] = [Self::Auth, Self::Request];

    #[must_use]
    pub fn from_name(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "auth" => Some(Self::Auth),
            "request" => Some(Self::Request),
            _ => None,
        }
    }

    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Auth => "auth",
            Self::Request => "request",
        }
    }

    /// Diagram text.
    #[must_use]
    pub fn text(self) -> &'static str {
        match self {
            Self::Auth => AUTH_FLOW,
            Self::Request => REQUEST_FLOW,
        }
    }
}

const AUTH_FLOW: &str = r##"{
  "nodes": [
    { "id": "start", "type": "process", "label": "Start Process",
      "data": { "description": "Initialize the workflow" } },
    { "id": "auth", "type": "default", "label": "User Authentication",
      "data": { "description": "Verify user credentials" } },
    { "id": "decision1", "type": "decision", "label": "Valid?", "data": {} },
    { "id": "success", "type": "process", "label": "Grant Access",
      "data": { "description": "User authenticated successfully" } },
    { "id": "failure", "type": "process", "label": "Deny Access",
      "data": { "description": "Authentication failed" } }
  ],
  "edges": [
    { "id": "e1", "source": "start", "target": "auth",
      "sourceHandle": "bottom-source", "targetHandle": "top-target",
      "label": "begin", "color": "#3b82f6", "strokeWidth": 2 },
    { "id": "e2", "source": "auth", "target": "decision1",
      "sourceHandle": "right-source", "targetHandle": "left-target",
      "label": "check credentials", "color": "#6366f1", "strokeWidth": 2 },
    { "id": "e3", "source": "decision1", "target": "success",
      "sourceHandle": "right-source", "targetHandle": "left-target",
      "label": "valid", "color": "#10b981", "strokeWidth": 3 },
    { "id": "e4", "source": "decision1", "target": "failure",
      "sourceHandle": "bottom-source", "targetHandle": "top-target",
      "label": "invalid", "color": "#ef4444", "strokeWidth": 3, "dashed": true }
  ]
}"##;

const REQUEST_FLOW: &str = r##"{
  "nodes": [
    { "id": "input", "type": "process", "label": "User Input",
      "data": { "description": "Collect user data" } },
    { "id": "validate", "type": "decision", "label": "Valid Data?", "data": {} },
    { "id": "process", "type": "default", "label": "Process Request",
      "data": { "description": "Handle the request" } },
    { "id": "error", "type": "process", "label": "Show Error",
      "data": { "description": "Display validation error" } },
    { "id": "success", "type": "process", "label": "Success Response",
      "data": { "description": "Return successful result" } }
  ],
  "edges": [
    { "id": "e1", "source": "input", "target": "validate",
      "sourceHandle": "right-source", "targetHandle": "left-target",
      "label": "submit", "color": "#8b5cf6", "strokeWidth": 2 },
    { "id": "e2", "source": "validate", "target": "process",
      "sourceHandle": "top-source", "targetHandle": "bottom-target",
      "label": "valid", "color": "#10b981", "strokeWidth": 3 },
    { "id": "e3", "source": "validate", "target": "error",
      "sourceHandle": "bottom-source", "targetHandle": "top-target",
      "label": "invalid", "color": "#ef4444", "strokeWidth": 2, "dashed": true },
    { "id": "e4", "source": "process", "target": "success",
      "sourceHandle": "right-source", "targetHandle": "left-target",
      "label": "complete", "color": "#06b6d4", "strokeWidth": 2, "animated": true }
  ]
}"##;
