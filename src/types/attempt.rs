// Copyright 2025 Fernando Borretti
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use crate::types::item_id::ItemId;
use crate::types::quality::Quality;
use crate::types::timestamp::Timestamp;

/// One answer event. Append-only: attempts are never mutated or deleted.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct Attempt {
    pub item_id: ItemId,
    pub quality: Quality,
    pub recorded_at: Timestamp,
}
