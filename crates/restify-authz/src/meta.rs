// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Authorization metadata serialized next to a resource, telling clients
//! which actions they may offer.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthorizationMeta {
	pub authorized_to_show: bool,
	pub authorized_to_store: bool,
	pub authorized_to_update: bool,
	pub authorized_to_delete: bool,
}
