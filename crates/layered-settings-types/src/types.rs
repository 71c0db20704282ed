//! Identifier types used throughout layered settings.
//!
//! All ids are plain integers as stored by the backing database. Zero is a
//! valid id; absence is always expressed with `Option`.

use serde::{Deserialize, Serialize};

macro_rules! id_type {
	($(#[$meta:meta])* $name:ident) => {
		$(#[$meta])*
		#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
		#[serde(transparent)]
		pub struct $name(pub i64);

		impl std::fmt::Display for $name {
			fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
				write!(f, "{}", self.0)
			}
		}

		impl From<i64> for $name {
			fn from(id: i64) -> Self {
				Self(id)
			}
		}
	};
}

id_type!(
	/// Identifies a layer of the override hierarchy (system, account, group, user, ...)
	LayerId
);
id_type!(
	/// Identifies a domain entity (a user, an account, a group) owning overrides
	EntityId
);
id_type!(
	/// Identifies a setting group shared by several entities
	GroupId
);
id_type!(SettingId);


// vim: ts=4
