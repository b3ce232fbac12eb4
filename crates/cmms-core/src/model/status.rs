//! Status and priority domains
//!
//! Each domain is one enum with a storage code (what the CHECK constraint in
//! the schema admits) and a display label (what consumers see). Serde uses the
//! label, SQL uses the code.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::errors::CmmsError;

macro_rules! status_domain {
    (
        $(#[$meta:meta])*
        $name:ident, $domain:literal, fallback = $fallback:ident {
            $( $(#[$vmeta:meta])* $variant:ident => ($code:literal, $label:literal) ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub enum $name {
            $( $(#[$vmeta])* #[serde(rename = $label)] $variant ),+
        }

        impl $name {
            /// Every value, in declaration order
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            /// Value used for storage codes that are not recognized
            pub const FALLBACK: $name = $name::$fallback;

            /// Storage code written to the database
            pub fn code(self) -> &'static str {
                match self {
                    $($name::$variant => $code),+
                }
            }

            /// Display label shown to users
            pub fn label(self) -> &'static str {
                match self {
                    $($name::$variant => $label),+
                }
            }

            /// Strict decode of a storage code
            pub fn try_from_code(code: &str) -> Option<Self> {
                match code {
                    $($code => Some($name::$variant),)+
                    _ => None,
                }
            }

            /// Decode a storage code, mapping unknown codes to the fallback
            pub fn from_code(code: &str) -> Self {
                match Self::try_from_code(code) {
                    Some(value) => value,
                    None => {
                        tracing::warn!(
                            domain = $domain,
                            code = code,
                            fallback = $name::$fallback.code(),
                            "unknown storage code, using fallback"
                        );
                        $name::$fallback
                    }
                }
            }

            pub fn from_label(label: &str) -> Option<Self> {
                match label {
                    $($label => Some($name::$variant),)+
                    _ => None,
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.label())
            }
        }

        /// Accepts either the display label or the storage code
        impl FromStr for $name {
            type Err = CmmsError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let s = s.trim();
                Self::from_label(s)
                    .or_else(|| Self::try_from_code(s))
                    .ok_or_else(|| CmmsError::UnknownLabel {
                        domain: $domain.to_string(),
                        label: s.to_string(),
                    })
            }
        }
    };
}

status_domain! {
    /// Operating state of a piece of equipment
    EquipmentStatus, "equipment status", fallback = Operational {
        Operational => ("operational", "Opérationnel"),
        Maintenance => ("maintenance", "En Maintenance"),
        Down => ("down", "En Panne"),
    }
}

status_domain! {
    /// Urgency shared by tickets and work orders
    Priority, "priority", fallback = Medium {
        High => ("high", "Haute"),
        Medium => ("medium", "Moyenne"),
        Low => ("low", "Basse"),
    }
}

status_domain! {
    TicketStatus, "ticket status", fallback = Open {
        Open => ("open", "Ouvert"),
        InProgress => ("in-progress", "En cours"),
        Resolved => ("resolved", "Résolu"),
    }
}

status_domain! {
    DowntimeStatus, "downtime status", fallback = Ongoing {
        Ongoing => ("ongoing", "En cours"),
        Resolved => ("resolved", "Résolu"),
    }
}

status_domain! {
    MaintenanceStatus, "maintenance status", fallback = Planned {
        Planned => ("planned", "Planifié"),
        Completed => ("completed", "Terminé"),
        Overdue => ("overdue", "En retard"),
    }
}

status_domain! {
    WorkOrderStatus, "work order status", fallback = Open {
        Open => ("open", "Ouvert"),
        InProgress => ("in-progress", "En cours"),
        Closed => ("closed", "Fermé"),
    }
}
