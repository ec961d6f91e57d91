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

use std::sync::Arc;

use crate::httpx::request::OnBehalfOfInfo;
use crate::mgmtx::bucket_settings::BucketSettings;
use crate::mgmtx::user::{Group, User};
use crate::retry::{RetryStrategy, DEFAULT_RETRY_STRATEGY};

#[derive(Clone, Debug)]
#[non_exhaustive]
pub struct GetCollectionManifestOptions<'a> {
    pub on_behalf_of_info: Option<&'a OnBehalfOfInfo>,
    pub bucket_name: &'a str,
    pub retry_strategy: Arc<dyn RetryStrategy>,
}

impl<'a> GetCollectionManifestOptions<'a> {
    pub fn new(bucket_name: &'a str) -> Self {
        Self {
            on_behalf_of_info: None,
            bucket_name,
            retry_strategy: DEFAULT_RETRY_STRATEGY.clone(),
        }
    }

    pub fn on_behalf_of_info(mut self, info: &'a OnBehalfOfInfo) -> Self {
        self.on_behalf_of_info = Some(info);
        self
    }

    pub fn retry_strategy(mut self, retry_strategy: Arc<dyn RetryStrategy>) -> Self {
        self.retry_strategy = retry_strategy;
        self
    }
}

impl<'a> From<&GetCollectionManifestOptions<'a>> for crate::mgmtx::options::GetCollectionManifestOptions<'a> {
    fn from(opts: &GetCollectionManifestOptions<'a>) -> Self {
        Self {
            on_behalf_of_info: opts.on_behalf_of_info,
            bucket_name: opts.bucket_name,
        }
    }
}

#[derive(Clone, Debug)]
#[non_exhaustive]
pub struct CreateScopeOptions<'a> {
    pub on_behalf_of_info: Option<&'a OnBehalfOfInfo>,
    pub bucket_name: &'a str,
    pub scope_name: &'a str,
    pub retry_strategy: Arc<dyn RetryStrategy>,
}

impl<'a> CreateScopeOptions<'a> {
    pub fn new(bucket_name: &'a str, scope_name: &'a str) -> Self {
        Self {
            on_behalf_of_info: None,
            bucket_name,
            scope_name,
            retry_strategy: DEFAULT_RETRY_STRATEGY.clone(),
        }
    }

    pub fn on_behalf_of_info(mut self, info: &'a OnBehalfOfInfo) -> Self {
        self.on_behalf_of_info = Some(info);
        self
    }

    pub fn retry_strategy(mut self, retry_strategy: Arc<dyn RetryStrategy>) -> Self {
        self.retry_strategy = retry_strategy;
        self
    }
}

impl<'a> From<&CreateScopeOptions<'a>> for crate::mgmtx::options::CreateScopeOptions<'a> {
    fn from(opts: &CreateScopeOptions<'a>) -> Self {
        Self {
            on_behalf_of_info: opts.on_behalf_of_info,
            bucket_name: opts.bucket_name,
            scope_name: opts.scope_name,
        }
    }
}

#[derive(Clone, Debug)]
#[non_exhaustive]
pub struct DeleteScopeOptions<'a> {
    pub on_behalf_of_info: Option<&'a OnBehalfOfInfo>,
    pub bucket_name: &'a str,
    pub scope_name: &'a str,
    pub retry_strategy: Arc<dyn RetryStrategy>,
}

impl<'a> DeleteScopeOptions<'a> {
    pub fn new(bucket_name: &'a str, scope_name: &'a str) -> Self {
        Self {
            on_behalf_of_info: None,
            bucket_name,
            scope_name,
            retry_strategy: DEFAULT_RETRY_STRATEGY.clone(),
        }
    }

    pub fn on_behalf_of_info(mut self, info: &'a OnBehalfOfInfo) -> Self {
        self.on_behalf_of_info = Some(info);
        self
    }

    pub fn retry_strategy(mut self, retry_strategy: Arc<dyn RetryStrategy>) -> Self {
        self.retry_strategy = retry_strategy;
        self
    }
}

impl<'a> From<&DeleteScopeOptions<'a>> for crate::mgmtx::options::DeleteScopeOptions<'a> {
    fn from(opts: &DeleteScopeOptions<'a>) -> Self {
        Self {
            on_behalf_of_info: opts.on_behalf_of_info,
            bucket_name: opts.bucket_name,
            scope_name: opts.scope_name,
        }
    }
}

#[derive(Clone, Debug)]
#[non_exhaustive]
pub struct CreateCollectionOptions<'a> {
    pub on_behalf_of_info: Option<&'a OnBehalfOfInfo>,
    pub bucket_name: &'a str,
    pub scope_name: &'a str,
    pub collection_name: &'a str,
    pub max_ttl: Option<i32>,
    pub history_enabled: Option<bool>,
    pub retry_strategy: Arc<dyn RetryStrategy>,
}

impl<'a> CreateCollectionOptions<'a> {
    pub fn new(bucket_name: &'a str, scope_name: &'a str, collection_name: &'a str) -> Self {
        Self {
            on_behalf_of_info: None,
            bucket_name,
            scope_name,
            collection_name,
            max_ttl: None,
            history_enabled: None,
            retry_strategy: DEFAULT_RETRY_STRATEGY.clone(),
        }
    }

    pub fn on_behalf_of_info(mut self, info: &'a OnBehalfOfInfo) -> Self {
        self.on_behalf_of_info = Some(info);
        self
    }

    pub fn max_ttl(mut self, max_ttl: i32) -> Self {
        self.max_ttl = Some(max_ttl);
        self
    }

    pub fn history_enabled(mut self, history_enabled: bool) -> Self {
        self.history_enabled = Some(history_enabled);
        self
    }

    pub fn retry_strategy(mut self, retry_strategy: Arc<dyn RetryStrategy>) -> Self {
        self.retry_strategy = retry_strategy;
        self
    }
}

impl<'a> From<&CreateCollectionOptions<'a>> for crate::mgmtx::options::CreateCollectionOptions<'a> {
    fn from(opts: &CreateCollectionOptions<'a>) -> Self {
        Self {
            on_behalf_of_info: opts.on_behalf_of_info,
            bucket_name: opts.bucket_name,
            scope_name: opts.scope_name,
            collection_name: opts.collection_name,
            max_ttl: opts.max_ttl,
            history_enabled: opts.history_enabled,
        }
    }
}

#[derive(Clone, Debug)]
#[non_exhaustive]
pub struct UpdateCollectionOptions<'a> {
    pub on_behalf_of_info: Option<&'a OnBehalfOfInfo>,
    pub bucket_name: &'a str,
    pub scope_name: &'a str,
    pub collection_name: &'a str,
    pub max_ttl: Option<i32>,
    pub history_enabled: Option<bool>,
    pub retry_strategy: Arc<dyn RetryStrategy>,
}

impl<'a> UpdateCollectionOptions<'a> {
    pub fn new(bucket_name: &'a str, scope_name: &'a str, collection_name: &'a str) -> Self {
        Self {
            on_behalf_of_info: None,
            bucket_name,
            scope_name,
            collection_name,
            max_ttl: None,
            history_enabled: None,
            retry_strategy: DEFAULT_RETRY_STRATEGY.clone(),
        }
    }

    pub fn on_behalf_of_info(mut self, info: &'a OnBehalfOfInfo) -> Self {
        self.on_behalf_of_info = Some(info);
        self
    }

    pub fn max_ttl(mut self, max_ttl: i32) -> Self {
        self.max_ttl = Some(max_ttl);
        self
    }

    pub fn history_enabled(mut self, history_enabled: bool) -> Self {
        self.history_enabled = Some(history_enabled);
        self
    }

    pub fn retry_strategy(mut self, retry_strategy: Arc<dyn RetryStrategy>) -> Self {
        self.retry_strategy = retry_strategy;
        self
    }
}

impl<'a> From<&UpdateCollectionOptions<'a>> for crate::mgmtx::options::UpdateCollectionOptions<'a> {
    fn from(opts: &UpdateCollectionOptions<'a>) -> Self {
        Self {
            on_behalf_of_info: opts.on_behalf_of_info,
            bucket_name: opts.bucket_name,
            scope_name: opts.scope_name,
            collection_name: opts.collection_name,
            max_ttl: opts.max_ttl,
            history_enabled: opts.history_enabled,
        }
    }
}

#[derive(Clone, Debug)]
#[non_exhaustive]
pub struct DeleteCollectionOptions<'a> {
    pub on_behalf_of_info: Option<&'a OnBehalfOfInfo>,
    pub bucket_name: &'a str,
    pub scope_name: &'a str,
    pub collection_name: &'a str,
    pub retry_strategy: Arc<dyn RetryStrategy>,
}

impl<'a> DeleteCollectionOptions<'a> {
    pub fn new(bucket_name: &'a str, scope_name: &'a str, collection_name: &'a str) -> Self {
        Self {
            on_behalf_of_info: None,
            bucket_name,
            scope_name,
            collection_name,
            retry_strategy: DEFAULT_RETRY_STRATEGY.clone(),
        }
    }

    pub fn on_behalf_of_info(mut self, info: &'a OnBehalfOfInfo) -> Self {
        self.on_behalf_of_info = Some(info);
        self
    }

    pub fn retry_strategy(mut self, retry_strategy: Arc<dyn RetryStrategy>) -> Self {
        self.retry_strategy = retry_strategy;
        self
    }
}

impl<'a> From<&DeleteCollectionOptions<'a>> for crate::mgmtx::options::DeleteCollectionOptions<'a> {
    fn from(opts: &DeleteCollectionOptions<'a>) -> Self {
        Self {
            on_behalf_of_info: opts.on_behalf_of_info,
            bucket_name: opts.bucket_name,
            scope_name: opts.scope_name,
            collection_name: opts.collection_name,
        }
    }
}

#[derive(Clone, Debug)]
#[non_exhaustive]
pub struct GetAllBucketsOptions<'a> {
    pub on_behalf_of_info: Option<&'a OnBehalfOfInfo>,
    pub retry_strategy: Arc<dyn RetryStrategy>,
}

impl<'a> GetAllBucketsOptions<'a> {
    pub fn new() -> Self {
        Self {
            on_behalf_of_info: None,
            retry_strategy: DEFAULT_RETRY_STRATEGY.clone(),
        }
    }

    pub fn on_behalf_of_info(mut self, info: &'a OnBehalfOfInfo) -> Self {
        self.on_behalf_of_info = Some(info);
        self
    }

    pub fn retry_strategy(mut self, retry_strategy: Arc<dyn RetryStrategy>) -> Self {
        self.retry_strategy = retry_strategy;
        self
    }
}

impl<'a> Default for GetAllBucketsOptions<'a> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'a> From<&GetAllBucketsOptions<'a>> for crate::mgmtx::options::GetAllBucketsOptions<'a> {
    fn from(opts: &GetAllBucketsOptions<'a>) -> Self {
        Self {
            on_behalf_of_info: opts.on_behalf_of_info,
        }
    }
}

#[derive(Clone, Debug)]
#[non_exhaustive]
pub struct GetBucketOptions<'a> {
    pub on_behalf_of_info: Option<&'a OnBehalfOfInfo>,
    pub bucket_name: &'a str,
    pub retry_strategy: Arc<dyn RetryStrategy>,
}

impl<'a> GetBucketOptions<'a> {
    pub fn new(bucket_name: &'a str) -> Self {
        Self {
            on_behalf_of_info: None,
            bucket_name,
            retry_strategy: DEFAULT_RETRY_STRATEGY.clone(),
        }
    }

    pub fn on_behalf_of_info(mut self, info: &'a OnBehalfOfInfo) -> Self {
        self.on_behalf_of_info = Some(info);
        self
    }

    pub fn retry_strategy(mut self, retry_strategy: Arc<dyn RetryStrategy>) -> Self {
        self.retry_strategy = retry_strategy;
        self
    }
}

impl<'a> From<&GetBucketOptions<'a>> for crate::mgmtx::options::GetBucketOptions<'a> {
    fn from(opts: &GetBucketOptions<'a>) -> Self {
        Self {
            on_behalf_of_info: opts.on_behalf_of_info,
            bucket_name: opts.bucket_name,
        }
    }
}

#[derive(Clone, Debug)]
#[non_exhaustive]
pub struct CreateBucketOptions<'a> {
    pub on_behalf_of_info: Option<&'a OnBehalfOfInfo>,
    pub bucket_name: &'a str,
    pub bucket_settings: &'a BucketSettings,
    pub retry_strategy: Arc<dyn RetryStrategy>,
}

impl<'a> CreateBucketOptions<'a> {
    pub fn new(bucket_name: &'a str, bucket_settings: &'a BucketSettings) -> Self {
        Self {
            on_behalf_of_info: None,
            bucket_name,
            bucket_settings,
            retry_strategy: DEFAULT_RETRY_STRATEGY.clone(),
        }
    }

    pub fn on_behalf_of_info(mut self, info: &'a OnBehalfOfInfo) -> Self {
        self.on_behalf_of_info = Some(info);
        self
    }

    pub fn retry_strategy(mut self, retry_strategy: Arc<dyn RetryStrategy>) -> Self {
        self.retry_strategy = retry_strategy;
        self
    }
}

impl<'a> From<&CreateBucketOptions<'a>> for crate::mgmtx::options::CreateBucketOptions<'a> {
    fn from(opts: &CreateBucketOptions<'a>) -> Self {
        Self {
            on_behalf_of_info: opts.on_behalf_of_info,
            bucket_name: opts.bucket_name,
            bucket_settings: opts.bucket_settings,
        }
    }
}

#[derive(Clone, Debug)]
#[non_exhaustive]
pub struct UpdateBucketOptions<'a> {
    pub on_behalf_of_info: Option<&'a OnBehalfOfInfo>,
    pub bucket_name: &'a str,
    pub bucket_settings: &'a BucketSettings,
    pub retry_strategy: Arc<dyn RetryStrategy>,
}

impl<'a> UpdateBucketOptions<'a> {
    pub fn new(bucket_name: &'a str, bucket_settings: &'a BucketSettings) -> Self {
        Self {
            on_behalf_of_info: None,
            bucket_name,
            bucket_settings,
            retry_strategy: DEFAULT_RETRY_STRATEGY.clone(),
        }
    }

    pub fn on_behalf_of_info(mut self, info: &'a OnBehalfOfInfo) -> Self {
        self.on_behalf_of_info = Some(info);
        self
    }

    pub fn retry_strategy(mut self, retry_strategy: Arc<dyn RetryStrategy>) -> Self {
        self.retry_strategy = retry_strategy;
        self
    }
}

impl<'a> From<&UpdateBucketOptions<'a>> for crate::mgmtx::options::UpdateBucketOptions<'a> {
    fn from(opts: &UpdateBucketOptions<'a>) -> Self {
        Self {
            on_behalf_of_info: opts.on_behalf_of_info,
            bucket_name: opts.bucket_name,
            bucket_settings: opts.bucket_settings,
        }
    }
}

#[derive(Clone, Debug)]
#[non_exhaustive]
pub struct DeleteBucketOptions<'a> {
    pub on_behalf_of_info: Option<&'a OnBehalfOfInfo>,
    pub bucket_name: &'a str,
    pub retry_strategy: Arc<dyn RetryStrategy>,
}

impl<'a> DeleteBucketOptions<'a> {
    pub fn new(bucket_name: &'a str) -> Self {
        Self {
            on_behalf_of_info: None,
            bucket_name,
            retry_strategy: DEFAULT_RETRY_STRATEGY.clone(),
        }
    }

    pub fn on_behalf_of_info(mut self, info: &'a OnBehalfOfInfo) -> Self {
        self.on_behalf_of_info = Some(info);
        self
    }

    pub fn retry_strategy(mut self, retry_strategy: Arc<dyn RetryStrategy>) -> Self {
        self.retry_strategy = retry_strategy;
        self
    }
}

impl<'a> From<&DeleteBucketOptions<'a>> for crate::mgmtx::options::DeleteBucketOptions<'a> {
    fn from(opts: &DeleteBucketOptions<'a>) -> Self {
        Self {
            on_behalf_of_info: opts.on_behalf_of_info,
            bucket_name: opts.bucket_name,
        }
    }
}

#[derive(Clone, Debug)]
#[non_exhaustive]
pub struct FlushBucketOptions<'a> {
    pub on_behalf_of_info: Option<&'a OnBehalfOfInfo>,
    pub bucket_name: &'a str,
    pub retry_strategy: Arc<dyn RetryStrategy>,
}

impl<'a> FlushBucketOptions<'a> {
    pub fn new(bucket_name: &'a str) -> Self {
        Self {
            on_behalf_of_info: None,
            bucket_name,
            retry_strategy: DEFAULT_RETRY_STRATEGY.clone(),
        }
    }

    pub fn on_behalf_of_info(mut self, info: &'a OnBehalfOfInfo) -> Self {
        self.on_behalf_of_info = Some(info);
        self
    }

    pub fn retry_strategy(mut self, retry_strategy: Arc<dyn RetryStrategy>) -> Self {
        self.retry_strategy = retry_strategy;
        self
    }
}

impl<'a> From<&FlushBucketOptions<'a>> for crate::mgmtx::options::FlushBucketOptions<'a> {
    fn from(opts: &FlushBucketOptions<'a>) -> Self {
        Self {
            on_behalf_of_info: opts.on_behalf_of_info,
            bucket_name: opts.bucket_name,
        }
    }
}

#[derive(Clone, Debug)]
#[non_exhaustive]
pub struct EnsureManifestOptions<'a> {
    pub on_behalf_of_info: Option<&'a OnBehalfOfInfo>,
    pub bucket_name: &'a str,
    pub manifest_uid: u64,
    pub retry_strategy: Arc<dyn RetryStrategy>,
}

impl<'a> EnsureManifestOptions<'a> {
    pub fn new(bucket_name: &'a str, manifest_uid: u64) -> Self {
        Self {
            on_behalf_of_info: None,
            bucket_name,
            manifest_uid,
            retry_strategy: DEFAULT_RETRY_STRATEGY.clone(),
        }
    }

    pub fn on_behalf_of_info(mut self, info: &'a OnBehalfOfInfo) -> Self {
        self.on_behalf_of_info = Some(info);
        self
    }

    pub fn retry_strategy(mut self, retry_strategy: Arc<dyn RetryStrategy>) -> Self {
        self.retry_strategy = retry_strategy;
        self
    }
}

#[derive(Clone, Debug)]
#[non_exhaustive]
pub struct EnsureBucketOptions<'a> {
    pub on_behalf_of_info: Option<&'a OnBehalfOfInfo>,
    pub bucket_name: &'a str,
    pub bucket_uuid: Option<&'a str>,
    pub want_missing: bool,
    pub retry_strategy: Arc<dyn RetryStrategy>,
}

impl<'a> EnsureBucketOptions<'a> {
    pub fn new(bucket_name: &'a str) -> Self {
        Self {
            on_behalf_of_info: None,
            bucket_name,
            bucket_uuid: None,
            want_missing: false,
            retry_strategy: DEFAULT_RETRY_STRATEGY.clone(),
        }
    }

    pub fn on_behalf_of_info(mut self, info: &'a OnBehalfOfInfo) -> Self {
        self.on_behalf_of_info = Some(info);
        self
    }

    pub fn bucket_uuid(mut self, bucket_uuid: &'a str) -> Self {
        self.bucket_uuid = Some(bucket_uuid);
        self
    }

    pub fn want_missing(mut self, want_missing: bool) -> Self {
        self.want_missing = want_missing;
        self
    }

    pub fn retry_strategy(mut self, retry_strategy: Arc<dyn RetryStrategy>) -> Self {
        self.retry_strategy = retry_strategy;
        self
    }
}

#[derive(Clone, Debug)]
#[non_exhaustive]
pub struct GetUserOptions<'a> {
    pub on_behalf_of_info: Option<&'a OnBehalfOfInfo>,
    pub username: &'a str,
    pub auth_domain: &'a str,
    pub retry_strategy: Arc<dyn RetryStrategy>,
}

impl<'a> GetUserOptions<'a> {
    pub fn new(username: &'a str, auth_domain: &'a str) -> Self {
        Self {
            on_behalf_of_info: None,
            username,
            auth_domain,
            retry_strategy: DEFAULT_RETRY_STRATEGY.clone(),
        }
    }

    pub fn on_behalf_of_info(mut self, info: &'a OnBehalfOfInfo) -> Self {
        self.on_behalf_of_info = Some(info);
        self
    }

    pub fn retry_strategy(mut self, retry_strategy: Arc<dyn RetryStrategy>) -> Self {
        self.retry_strategy = retry_strategy;
        self
    }
}

impl<'a> From<&GetUserOptions<'a>> for crate::mgmtx::options::GetUserOptions<'a> {
    fn from(opts: &GetUserOptions<'a>) -> Self {
        Self {
            on_behalf_of_info: opts.on_behalf_of_info,
            username: opts.username,
            auth_domain: opts.auth_domain,
        }
    }
}

#[derive(Clone, Debug)]
#[non_exhaustive]
pub struct GetAllUsersOptions<'a> {
    pub on_behalf_of_info: Option<&'a OnBehalfOfInfo>,
    pub auth_domain: &'a str,
    pub retry_strategy: Arc<dyn RetryStrategy>,
}

impl<'a> GetAllUsersOptions<'a> {
    pub fn new(auth_domain: &'a str) -> Self {
        Self {
            on_behalf_of_info: None,
            auth_domain,
            retry_strategy: DEFAULT_RETRY_STRATEGY.clone(),
        }
    }

    pub fn on_behalf_of_info(mut self, info: &'a OnBehalfOfInfo) -> Self {
        self.on_behalf_of_info = Some(info);
        self
    }

    pub fn retry_strategy(mut self, retry_strategy: Arc<dyn RetryStrategy>) -> Self {
        self.retry_strategy = retry_strategy;
        self
    }
}

impl<'a> From<&GetAllUsersOptions<'a>> for crate::mgmtx::options::GetAllUsersOptions<'a> {
    fn from(opts: &GetAllUsersOptions<'a>) -> Self {
        Self {
            on_behalf_of_info: opts.on_behalf_of_info,
            auth_domain: opts.auth_domain,
        }
    }
}

#[derive(Clone, Debug)]
#[non_exhaustive]
pub struct UpsertUserOptions<'a> {
    pub on_behalf_of_info: Option<&'a OnBehalfOfInfo>,
    pub user: &'a User,
    pub auth_domain: &'a str,
    pub retry_strategy: Arc<dyn RetryStrategy>,
}

impl<'a> UpsertUserOptions<'a> {
    pub fn new(user: &'a User, auth_domain: &'a str) -> Self {
        Self {
            on_behalf_of_info: None,
            user,
            auth_domain,
            retry_strategy: DEFAULT_RETRY_STRATEGY.clone(),
        }
    }

    pub fn on_behalf_of_info(mut self, info: &'a OnBehalfOfInfo) -> Self {
        self.on_behalf_of_info = Some(info);
        self
    }

    pub fn retry_strategy(mut self, retry_strategy: Arc<dyn RetryStrategy>) -> Self {
        self.retry_strategy = retry_strategy;
        self
    }
}

impl<'a> From<&UpsertUserOptions<'a>> for crate::mgmtx::options::UpsertUserOptions<'a> {
    fn from(opts: &UpsertUserOptions<'a>) -> Self {
        Self {
            on_behalf_of_info: opts.on_behalf_of_info,
            user: opts.user,
            auth_domain: opts.auth_domain,
        }
    }
}

#[derive(Clone, Debug)]
#[non_exhaustive]
pub struct DeleteUserOptions<'a> {
    pub on_behalf_of_info: Option<&'a OnBehalfOfInfo>,
    pub username: &'a str,
    pub auth_domain: &'a str,
    pub retry_strategy: Arc<dyn RetryStrategy>,
}

impl<'a> DeleteUserOptions<'a> {
    pub fn new(username: &'a str, auth_domain: &'a str) -> Self {
        Self {
            on_behalf_of_info: None,
            username,
            auth_domain,
            retry_strategy: DEFAULT_RETRY_STRATEGY.clone(),
        }
    }

    pub fn on_behalf_of_info(mut self, info: &'a OnBehalfOfInfo) -> Self {
        self.on_behalf_of_info = Some(info);
        self
    }

    pub fn retry_strategy(mut self, retry_strategy: Arc<dyn RetryStrategy>) -> Self {
        self.retry_strategy = retry_strategy;
        self
    }
}

impl<'a> From<&DeleteUserOptions<'a>> for crate::mgmtx::options::DeleteUserOptions<'a> {
    fn from(opts: &DeleteUserOptions<'a>) -> Self {
        Self {
            on_behalf_of_info: opts.on_behalf_of_info,
            username: opts.username,
            auth_domain: opts.auth_domain,
        }
    }
}

#[derive(Clone, Debug)]
#[non_exhaustive]
pub struct GetRolesOptions<'a> {
    pub on_behalf_of_info: Option<&'a OnBehalfOfInfo>,
    pub retry_strategy: Arc<dyn RetryStrategy>,
}

impl<'a> GetRolesOptions<'a> {
    pub fn new() -> Self {
        Self {
            on_behalf_of_info: None,
            retry_strategy: DEFAULT_RETRY_STRATEGY.clone(),
        }
    }

    pub fn on_behalf_of_info(mut self, info: &'a OnBehalfOfInfo) -> Self {
        self.on_behalf_of_info = Some(info);
        self
    }

    pub fn retry_strategy(mut self, retry_strategy: Arc<dyn RetryStrategy>) -> Self {
        self.retry_strategy = retry_strategy;
        self
    }
}

impl<'a> Default for GetRolesOptions<'a> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'a> From<&GetRolesOptions<'a>> for crate::mgmtx::options::GetRolesOptions<'a> {
    fn from(opts: &GetRolesOptions<'a>) -> Self {
        Self {
            on_behalf_of_info: opts.on_behalf_of_info,
        }
    }
}

#[derive(Clone, Debug)]
#[non_exhaustive]
pub struct GetGroupOptions<'a> {
    pub on_behalf_of_info: Option<&'a OnBehalfOfInfo>,
    pub group_name: &'a str,
    pub retry_strategy: Arc<dyn RetryStrategy>,
}

impl<'a> GetGroupOptions<'a> {
    pub fn new(group_name: &'a str) -> Self {
        Self {
            on_behalf_of_info: None,
            group_name,
            retry_strategy: DEFAULT_RETRY_STRATEGY.clone(),
        }
    }

    pub fn on_behalf_of_info(mut self, info: &'a OnBehalfOfInfo) -> Self {
        self.on_behalf_of_info = Some(info);
        self
    }

    pub fn retry_strategy(mut self, retry_strategy: Arc<dyn RetryStrategy>) -> Self {
        self.retry_strategy = retry_strategy;
        self
    }
}

impl<'a> From<&GetGroupOptions<'a>> for crate::mgmtx::options::GetGroupOptions<'a> {
    fn from(opts: &GetGroupOptions<'a>) -> Self {
        Self {
            on_behalf_of_info: opts.on_behalf_of_info,
            group_name: opts.group_name,
        }
    }
}

#[derive(Clone, Debug)]
#[non_exhaustive]
pub struct GetAllGroupsOptions<'a> {
    pub on_behalf_of_info: Option<&'a OnBehalfOfInfo>,
    pub retry_strategy: Arc<dyn RetryStrategy>,
}

impl<'a> GetAllGroupsOptions<'a> {
    pub fn new() -> Self {
        Self {
            on_behalf_of_info: None,
            retry_strategy: DEFAULT_RETRY_STRATEGY.clone(),
        }
    }

    pub fn on_behalf_of_info(mut self, info: &'a OnBehalfOfInfo) -> Self {
        self.on_behalf_of_info = Some(info);
        self
    }

    pub fn retry_strategy(mut self, retry_strategy: Arc<dyn RetryStrategy>) -> Self {
        self.retry_strategy = retry_strategy;
        self
    }
}

impl<'a> Default for GetAllGroupsOptions<'a> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'a> From<&GetAllGroupsOptions<'a>> for crate::mgmtx::options::GetAllGroupsOptions<'a> {
    fn from(opts: &GetAllGroupsOptions<'a>) -> Self {
        Self {
            on_behalf_of_info: opts.on_behalf_of_info,
        }
    }
}

#[derive(Clone, Debug)]
#[non_exhaustive]
pub struct UpsertGroupOptions<'a> {
    pub on_behalf_of_info: Option<&'a OnBehalfOfInfo>,
    pub group: &'a Group,
    pub retry_strategy: Arc<dyn RetryStrategy>,
}

impl<'a> UpsertGroupOptions<'a> {
    pub fn new(group: &'a Group) -> Self {
        Self {
            on_behalf_of_info: None,
            group,
            retry_strategy: DEFAULT_RETRY_STRATEGY.clone(),
        }
    }

    pub fn on_behalf_of_info(mut self, info: &'a OnBehalfOfInfo) -> Self {
        self.on_behalf_of_info = Some(info);
        self
    }

    pub fn retry_strategy(mut self, retry_strategy: Arc<dyn RetryStrategy>) -> Self {
        self.retry_strategy = retry_strategy;
        self
    }
}

impl<'a> From<&UpsertGroupOptions<'a>> for crate::mgmtx::options::UpsertGroupOptions<'a> {
    fn from(opts: &UpsertGroupOptions<'a>) -> Self {
        Self {
            on_behalf_of_info: opts.on_behalf_of_info,
            group: opts.group,
        }
    }
}

#[derive(Clone, Debug)]
#[non_exhaustive]
pub struct DeleteGroupOptions<'a> {
    pub on_behalf_of_info: Option<&'a OnBehalfOfInfo>,
    pub group_name: &'a str,
    pub retry_strategy: Arc<dyn RetryStrategy>,
}

impl<'a> DeleteGroupOptions<'a> {
    pub fn new(group_name: &'a str) -> Self {
        Self {
            on_behalf_of_info: None,
            group_name,
            retry_strategy: DEFAULT_RETRY_STRATEGY.clone(),
        }
    }

    pub fn on_behalf_of_info(mut self, info: &'a OnBehalfOfInfo) -> Self {
        self.on_behalf_of_info = Some(info);
        self
    }

    pub fn retry_strategy(mut self, retry_strategy: Arc<dyn RetryStrategy>) -> Self {
        self.retry_strategy = retry_strategy;
        self
    }
}

impl<'a> From<&DeleteGroupOptions<'a>> for crate::mgmtx::options::DeleteGroupOptions<'a> {
    fn from(opts: &DeleteGroupOptions<'a>) -> Self {
        Self {
            on_behalf_of_info: opts.on_behalf_of_info,
            group_name: opts.group_name,
        }
    }
}

#[derive(Clone, Debug)]
#[non_exhaustive]
pub struct ChangePasswordOptions<'a> {
    pub on_behalf_of_info: Option<&'a OnBehalfOfInfo>,
    pub new_password: &'a str,
    pub retry_strategy: Arc<dyn RetryStrategy>,
}

impl<'a> ChangePasswordOptions<'a> {
    pub fn new(new_password: &'a str) -> Self {
        Self {
            on_behalf_of_info: None,
            new_password,
            retry_strategy: DEFAULT_RETRY_STRATEGY.clone(),
        }
    }

    pub fn on_behalf_of_info(mut self, info: &'a OnBehalfOfInfo) -> Self {
        self.on_behalf_of_info = Some(info);
        self
    }

    pub fn retry_strategy(mut self, retry_strategy: Arc<dyn RetryStrategy>) -> Self {
        self.retry_strategy = retry_strategy;
        self
    }
}

impl<'a> From<&ChangePasswordOptions<'a>> for crate::mgmtx::options::ChangePasswordOptions<'a> {
    fn from(opts: &ChangePasswordOptions<'a>) -> Self {
        Self {
            on_behalf_of_info: opts.on_behalf_of_info,
            new_password: opts.new_password,
        }
    }
}

#[derive(Clone, Debug)]
#[non_exhaustive]
pub struct EnsureUserOptions<'a> {
    pub on_behalf_of_info: Option<&'a OnBehalfOfInfo>,
    pub username: &'a str,
    pub auth_domain: &'a str,
    pub want_missing: bool,
    pub retry_strategy: Arc<dyn RetryStrategy>,
}

impl<'a> EnsureUserOptions<'a> {
    pub fn new(username: &'a str, auth_domain: &'a str) -> Self {
        Self {
            on_behalf_of_info: None,
            username,
            auth_domain,
            want_missing: false,
            retry_strategy: DEFAULT_RETRY_STRATEGY.clone(),
        }
    }

    pub fn on_behalf_of_info(mut self, info: &'a OnBehalfOfInfo) -> Self {
        self.on_behalf_of_info = Some(info);
        self
    }

    pub fn want_missing(mut self, want_missing: bool) -> Self {
        self.want_missing = want_missing;
        self
    }

    pub fn retry_strategy(mut self, retry_strategy: Arc<dyn RetryStrategy>) -> Self {
        self.retry_strategy = retry_strategy;
        self
    }
}

#[derive(Clone, Debug)]
#[non_exhaustive]
pub struct EnsureGroupOptions<'a> {
    pub on_behalf_of_info: Option<&'a OnBehalfOfInfo>,
    pub group_name: &'a str,
    pub want_missing: bool,
    pub retry_strategy: Arc<dyn RetryStrategy>,
}

impl<'a> EnsureGroupOptions<'a> {
    pub fn new(group_name: &'a str) -> Self {
        Self {
            on_behalf_of_info: None,
            group_name,
            want_missing: false,
            retry_strategy: DEFAULT_RETRY_STRATEGY.clone(),
        }
    }

    pub fn on_behalf_of_info(mut self, info: &'a OnBehalfOfInfo) -> Self {
        self.on_behalf_of_info = Some(info);
        self
    }

    pub fn want_missing(mut self, want_missing: bool) -> Self {
        self.want_missing = want_missing;
        self
    }

    pub fn retry_strategy(mut self, retry_strategy: Arc<dyn RetryStrategy>) -> Self {
        self.retry_strategy = retry_strategy;
        self
    }
}
