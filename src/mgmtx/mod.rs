/*
 *
 *  * Copyright (c) 2025 Couchbase, Inc.
 *  *
 *  * Licensed under the Apache License, Version 2.0 (the "License");
 *  * you may not use this file except in compliance with the License.
 *  * You may obtain a copy of the License at
 *  *
 *  *    http://www.apache.org/licenses/LICENSE-2.0
 *  *
 *  * Unless required by applicable law or agreed to in writing, software
 *  * distributed under the License is distributed on an "AS IS" BASIS,
 *  * WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
 *  * See the License for the specific language governing permissions and
 *  * limitations under the License.
 *
 */

pub mod bucket_helper;
pub mod bucket_settings;
mod bucket_settings_json;
pub mod error;
pub mod group_helper;
pub mod manifest_helper;
pub mod mgmt;
pub mod mgmt_bucket;
pub mod mgmt_collection;
pub mod mgmt_query;
pub mod mgmt_user;
pub mod node_target;
pub mod options;
pub mod responses;
pub mod user;
pub mod user_helper;
mod user_json;
