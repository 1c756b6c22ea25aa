// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

pub mod background;
pub mod list;
pub mod restore;
pub mod run;
