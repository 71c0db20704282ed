//! Entity context of a resolution request

use crate::prelude::*;

/// Describes which entity a setting is resolved for, and how its ancestry is known.
///
/// Callers map their domain objects (users, groups, accounts) onto one of these
/// shapes; the resolver itself has no notion of what a parent is.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum EntityContext {
	/// No entity: only layer-wide defaults apply
	#[default]
	None,
	/// A single entity without known ancestry
	EntityOnly(EntityId),
	/// An entity and its ancestors, ordered outward toward the root layer.
	/// An absent ancestor (a user without a group) is kept as `None`.
	EntityWithAncestors(EntityId, Vec<Option<EntityId>>),
	/// An entity belonging to a setting group shared by many entities
	EntityWithGroup(EntityId, GroupId),
}

impl EntityContext {
	/// A single parent re-supplied at every coarser layer.
	///
	/// `depth` is the number of fallback steps from the queried layer to the
	/// root, see [`crate::FrozenLayerRegistry::depth`].
	pub fn with_parent(entity_id: EntityId, parent_id: Option<EntityId>, depth: usize) -> Self {
		match parent_id {
			Some(parent_id) => Self::EntityWithAncestors(entity_id, vec![Some(parent_id); depth]),
			None => Self::EntityOnly(entity_id),
		}
	}

	pub fn entity_id(&self) -> Option<EntityId> {
		match self {
			Self::None => None,
			Self::EntityOnly(entity_id)
			| Self::EntityWithAncestors(entity_id, _)
			| Self::EntityWithGroup(entity_id, _) => Some(*entity_id),
		}
	}

	pub fn group_id(&self) -> Option<GroupId> {
		match self {
			Self::EntityWithGroup(_, group_id) => Some(*group_id),
			_ => None,
		}
	}

	pub fn ancestors(&self) -> &[Option<EntityId>] {
		match self {
			Self::EntityWithAncestors(_, ancestors) => ancestors,
			_ => &[],
		}
	}
}

impl From<EntityId> for EntityContext {
	fn from(entity_id: EntityId) -> Self {
		Self::EntityOnly(entity_id)
	}
}

impl From<Option<EntityId>> for EntityContext {
	fn from(entity_id: Option<EntityId>) -> Self {
		entity_id.map_or(Self::None, Self::EntityOnly)
	}
}


// vim: ts=4
