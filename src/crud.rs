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

use std::future::Future;
use std::sync::Arc;

use futures::TryFutureExt;

use crate::collectionresolver::{orchestrate_memd_collection_id, CollectionResolver};
use crate::compressionmanager::{CompressionManager, Compressor};
use crate::error::{Error, MemdxError, Result};
use crate::kv_orchestration::{orchestrate_endpoint_kv_client, KvClientManagerClientType};
use crate::kvclient_ops::KvClientOps;
use crate::kvendpointclientmanager::KvEndpointClientManager;
use crate::memdx::request::{
    AddRequest, AppendRequest, DecrementRequest, DeleteRequest, GetAndLockRequest,
    GetAndTouchRequest, GetMetaRequest, GetRequest, IncrementRequest, LookupInRequest,
    MutateInRequest, PrependRequest, ReplaceRequest, SetRequest, TouchRequest, UnlockRequest,
};
use crate::mutationtoken::MutationToken;
use crate::nmvbhandler::NotMyVbucketConfigHandler;
use crate::options::crud::{
    AddOptions, AppendOptions, DecrementOptions, DeleteOptions, GetAndLockOptions,
    GetAndTouchOptions, GetCollectionIdOptions, GetMetaOptions, GetOptions, IncrementOptions,
    LookupInOptions, MutateInOptions, PrependOptions, ReplaceOptions, TouchOptions, UnlockOptions,
    UpsertOptions,
};
use crate::results::kv::{
    AddResult, AppendResult, DecrementResult, DeleteResult, GetAndLockResult, GetAndTouchResult,
    GetCollectionIdResult, GetMetaResult, GetResult, IncrementResult, LookupInResult,
    MutateInResult, PrependResult, ReplaceResult, SubDocResult, TouchResult, UnlockResult,
    UpsertResult,
};
use crate::retry::{orchestrate_retries, RetryInfo, RetryManager, RetryStrategy};
use crate::vbucketrouter::{orchestrate_memd_routing, VbucketRouter};

pub(crate) struct CrudComponent<
    M: KvEndpointClientManager,
    V: VbucketRouter,
    Nmvb: NotMyVbucketConfigHandler,
    Cr: CollectionResolver,
    C: Compressor,
> {
    conn_manager: Arc<M>,
    router: Arc<V>,
    nmvb_handler: Arc<Nmvb>,
    collections: Arc<Cr>,
    retry_manager: Arc<RetryManager>,
    compression_manager: Arc<CompressionManager<C>>,
}

fn mutation_token(vb_id: u16, token: Option<MutationToken>) -> Option<MutationToken> {
    token.map(|t| MutationToken {
        vbid: vb_id,
        vbuuid: t.vbuuid,
        seqno: t.seqno,
    })
}

fn subdoc_result(result: crate::memdx::subdoc::SubDocResult) -> SubDocResult {
    SubDocResult {
        err: result.err.map(MemdxError::new),
        value: result.value,
    }
}

impl<M, V, Nmvb, Cr, C> CrudComponent<M, V, Nmvb, Cr, C>
where
    M: KvEndpointClientManager,
    V: VbucketRouter,
    Nmvb: NotMyVbucketConfigHandler,
    Cr: CollectionResolver,
    C: Compressor,
{
    pub(crate) fn new(
        nmvb_handler: Arc<Nmvb>,
        router: Arc<V>,
        conn_manager: Arc<M>,
        collections: Arc<Cr>,
        retry_manager: Arc<RetryManager>,
        compression_manager: Arc<CompressionManager<C>>,
    ) -> Self {
        CrudComponent {
            conn_manager,
            router,
            nmvb_handler,
            collections,
            retry_manager,
            compression_manager,
        }
    }

    fn compress_value<'a>(
        &self,
        compressor: &'a mut C,
        client: &Arc<KvClientManagerClientType<M>>,
        datatype: crate::memdx::datatype::DataTypeFlag,
        value: &'a [u8],
    ) -> Result<(&'a [u8], u8)> {
        compressor
            .compress(
                client.has_feature(crate::memdx::hello_feature::HelloFeature::Snappy),
                datatype,
                value,
            )
            .map_err(Into::into)
    }

    async fn orchestrate<Resp, Fut>(
        &self,
        operation_name: &'static str,
        is_idempotent: bool,
        key: &[u8],
        scope_name: &str,
        collection_name: &str,
        retry_strategy: Arc<dyn RetryStrategy>,
        operation: impl Fn(String, u16, u32, Arc<KvClientManagerClientType<M>>) -> Fut + Send + Sync,
    ) -> Result<Resp>
    where
        Fut: Future<Output = Result<Resp>> + Send,
        Resp: Send,
    {
        let retry_info = RetryInfo::new(operation_name, is_idempotent, retry_strategy);

        orchestrate_retries(self.retry_manager.clone(), retry_info, async || {
            orchestrate_memd_routing(
                self.router.clone(),
                self.nmvb_handler.clone(),
                key,
                0,
                async |endpoint: String, vb_id: u16| {
                    orchestrate_memd_collection_id(
                        self.collections.clone(),
                        scope_name,
                        collection_name,
                        async |collection_id: u32| {
                            orchestrate_endpoint_kv_client(
                                self.conn_manager.clone(),
                                &endpoint,
                                async |client: Arc<KvClientManagerClientType<M>>| {
                                    operation(endpoint.clone(), vb_id, collection_id, client).await
                                },
                            )
                            .await
                        },
                    )
                    .await
                },
            )
            .await
        })
        .await
    }

    pub(crate) async fn upsert(&self, opts: UpsertOptions<'_>) -> Result<UpsertResult> {
        self.orchestrate(
            "Set",
            false,
            opts.key,
            opts.scope_name,
            opts.collection_name,
            opts.retry_strategy,
            async |_endpoint, vb_id, collection_id, client| {
                let mut compressor = self.compression_manager.compressor();
                let (value, datatype) =
                    self.compress_value(&mut compressor, &client, opts.datatype, opts.value)?;

                client
                    .set(SetRequest {
                        collection_id,
                        key: opts.key,
                        vbucket_id: vb_id,
                        flags: opts.flags,
                        value,
                        datatype,
                        expiry: opts.expiry,
                        preserve_expiry: opts.preserve_expiry,
                        cas: opts.cas,
                        on_behalf_of: None,
                        durability_level: opts.durability_level,
                        durability_level_timeout: None,
                    })
                    .map_ok(|resp| UpsertResult {
                        cas: resp.cas,
                        mutation_token: mutation_token(vb_id, resp.mutation_token),
                    })
                    .map_err(Error::new_contextual_memdx_error)
                    .await
            },
        )
        .await
    }

    pub(crate) async fn add(&self, opts: AddOptions<'_>) -> Result<AddResult> {
        self.orchestrate(
            "Add",
            false,
            opts.key,
            opts.scope_name,
            opts.collection_name,
            opts.retry_strategy,
            async |_endpoint, vb_id, collection_id, client| {
                let mut compressor = self.compression_manager.compressor();
                let (value, datatype) =
                    self.compress_value(&mut compressor, &client, opts.datatype, opts.value)?;

                client
                    .add(AddRequest {
                        collection_id,
                        key: opts.key,
                        vbucket_id: vb_id,
                        flags: opts.flags,
                        value,
                        datatype,
                        expiry: opts.expiry,
                        on_behalf_of: None,
                        durability_level: opts.durability_level,
                        durability_level_timeout: None,
                    })
                    .map_ok(|resp| AddResult {
                        cas: resp.cas,
                        mutation_token: mutation_token(vb_id, resp.mutation_token),
                    })
                    .map_err(Error::new_contextual_memdx_error)
                    .await
            },
        )
        .await
    }

    pub(crate) async fn replace(&self, opts: ReplaceOptions<'_>) -> Result<ReplaceResult> {
        self.orchestrate(
            "Replace",
            false,
            opts.key,
            opts.scope_name,
            opts.collection_name,
            opts.retry_strategy,
            async |_endpoint, vb_id, collection_id, client| {
                let mut compressor = self.compression_manager.compressor();
                let (value, datatype) =
                    self.compress_value(&mut compressor, &client, opts.datatype, opts.value)?;

                client
                    .replace(ReplaceRequest {
                        collection_id,
                        key: opts.key,
                        vbucket_id: vb_id,
                        flags: opts.flags,
                        value,
                        datatype,
                        expiry: opts.expiry,
                        preserve_expiry: opts.preserve_expiry,
                        cas: opts.cas,
                        on_behalf_of: None,
                        durability_level: opts.durability_level,
                        durability_level_timeout: None,
                    })
                    .map_ok(|resp| ReplaceResult {
                        cas: resp.cas,
                        mutation_token: mutation_token(vb_id, resp.mutation_token),
                    })
                    .map_err(Error::new_contextual_memdx_error)
                    .await
            },
        )
        .await
    }

    pub(crate) async fn delete(&self, opts: DeleteOptions<'_>) -> Result<DeleteResult> {
        self.orchestrate(
            "Delete",
            false,
            opts.key,
            opts.scope_name,
            opts.collection_name,
            opts.retry_strategy,
            async |_endpoint, vb_id, collection_id, client| {
                client
                    .delete(DeleteRequest {
                        collection_id,
                        key: opts.key,
                        vbucket_id: vb_id,
                        cas: opts.cas,
                        on_behalf_of: None,
                        durability_level: opts.durability_level,
                        durability_level_timeout: None,
                    })
                    .map_ok(|resp| DeleteResult {
                        cas: resp.cas,
                        mutation_token: mutation_token(vb_id, resp.mutation_token),
                    })
                    .map_err(Error::new_contextual_memdx_error)
                    .await
            },
        )
        .await
    }

    pub(crate) async fn get(&self, opts: GetOptions<'_>) -> Result<GetResult> {
        self.orchestrate(
            "Get",
            true,
            opts.key,
            opts.scope_name,
            opts.collection_name,
            opts.retry_strategy,
            async |_endpoint, vb_id, collection_id, client| {
                client
                    .get(GetRequest {
                        collection_id,
                        key: opts.key,
                        vbucket_id: vb_id,
                        on_behalf_of: None,
                    })
                    .map_ok(|resp| GetResult {
                        value: resp.value,
                        flags: resp.flags,
                        datatype: resp.datatype,
                        cas: resp.cas,
                    })
                    .map_err(Error::new_contextual_memdx_error)
                    .await
            },
        )
        .await
    }

    pub(crate) async fn get_meta(&self, opts: GetMetaOptions<'_>) -> Result<GetMetaResult> {
        self.orchestrate(
            "GetMeta",
            true,
            opts.key,
            opts.scope_name,
            opts.collection_name,
            opts.retry_strategy,
            async |_endpoint, vb_id, collection_id, client| {
                client
                    .get_meta(GetMetaRequest {
                        collection_id,
                        key: opts.key,
                        vbucket_id: vb_id,
                        on_behalf_of: None,
                    })
                    .map_ok(|resp| GetMetaResult {
                        cas: resp.cas,
                        flags: resp.flags,
                        value: resp.value,
                        datatype: resp.datatype,
                        server_duration: resp.server_duration,
                        expiry: resp.expiry,
                        seq_no: resp.seq_no,
                        deleted: resp.deleted,
                    })
                    .map_err(Error::new_contextual_memdx_error)
                    .await
            },
        )
        .await
    }

    pub(crate) async fn append(&self, opts: AppendOptions<'_>) -> Result<AppendResult> {
        self.orchestrate(
            "Append",
            false,
            opts.key,
            opts.scope_name,
            opts.collection_name,
            opts.retry_strategy,
            async |_endpoint, vb_id, collection_id, client| {
                client
                    .append(AppendRequest {
                        collection_id,
                        key: opts.key,
                        vbucket_id: vb_id,
                        value: opts.value,
                        datatype: 0,
                        cas: opts.cas,
                        on_behalf_of: None,
                        durability_level: opts.durability_level,
                        durability_level_timeout: None,
                    })
                    .map_ok(|resp| AppendResult {
                        cas: resp.cas,
                        mutation_token: mutation_token(vb_id, resp.mutation_token),
                    })
                    .map_err(Error::new_contextual_memdx_error)
                    .await
            },
        )
        .await
    }

    pub(crate) async fn prepend(&self, opts: PrependOptions<'_>) -> Result<PrependResult> {
        self.orchestrate(
            "Prepend",
            false,
            opts.key,
            opts.scope_name,
            opts.collection_name,
            opts.retry_strategy,
            async |_endpoint, vb_id, collection_id, client| {
                client
                    .prepend(PrependRequest {
                        collection_id,
                        key: opts.key,
                        vbucket_id: vb_id,
                        value: opts.value,
                        datatype: 0,
                        cas: opts.cas,
                        on_behalf_of: None,
                        durability_level: opts.durability_level,
                        durability_level_timeout: None,
                    })
                    .map_ok(|resp| PrependResult {
                        cas: resp.cas,
                        mutation_token: mutation_token(vb_id, resp.mutation_token),
                    })
                    .map_err(Error::new_contextual_memdx_error)
                    .await
            },
        )
        .await
    }

    pub(crate) async fn increment(&self, opts: IncrementOptions<'_>) -> Result<IncrementResult> {
        self.orchestrate(
            "Increment",
            false,
            opts.key,
            opts.scope_name,
            opts.collection_name,
            opts.retry_strategy,
            async |_endpoint, vb_id, collection_id, client| {
                client
                    .increment(IncrementRequest {
                        collection_id,
                        key: opts.key,
                        vbucket_id: vb_id,
                        delta: opts.delta,
                        initial: opts.initial,
                        expiry: opts.expiry,
                        on_behalf_of: None,
                        durability_level: opts.durability_level,
                        durability_level_timeout: None,
                    })
                    .map_ok(|resp| IncrementResult {
                        value: resp.value,
                        cas: resp.cas,
                        mutation_token: mutation_token(vb_id, resp.mutation_token),
                    })
                    .map_err(Error::new_contextual_memdx_error)
                    .await
            },
        )
        .await
    }

    pub(crate) async fn decrement(&self, opts: DecrementOptions<'_>) -> Result<DecrementResult> {
        self.orchestrate(
            "Decrement",
            false,
            opts.key,
            opts.scope_name,
            opts.collection_name,
            opts.retry_strategy,
            async |_endpoint, vb_id, collection_id, client| {
                client
                    .decrement(DecrementRequest {
                        collection_id,
                        key: opts.key,
                        vbucket_id: vb_id,
                        delta: opts.delta,
                        initial: opts.initial,
                        expiry: opts.expiry,
                        on_behalf_of: None,
                        durability_level: opts.durability_level,
                        durability_level_timeout: None,
                    })
                    .map_ok(|resp| DecrementResult {
                        value: resp.value,
                        cas: resp.cas,
                        mutation_token: mutation_token(vb_id, resp.mutation_token),
                    })
                    .map_err(Error::new_contextual_memdx_error)
                    .await
            },
        )
        .await
    }

    pub(crate) async fn touch(&self, opts: TouchOptions<'_>) -> Result<TouchResult> {
        self.orchestrate(
            "Touch",
            false,
            opts.key,
            opts.scope_name,
            opts.collection_name,
            opts.retry_strategy,
            async |_endpoint, vb_id, collection_id, client| {
                client
                    .touch(TouchRequest {
                        collection_id,
                        key: opts.key,
                        vbucket_id: vb_id,
                        expiry: opts.expiry,
                        on_behalf_of: None,
                    })
                    .map_ok(|resp| TouchResult { cas: resp.cas })
                    .map_err(Error::new_contextual_memdx_error)
                    .await
            },
        )
        .await
    }

    pub(crate) async fn get_and_touch(
        &self,
        opts: GetAndTouchOptions<'_>,
    ) -> Result<GetAndTouchResult> {
        self.orchestrate(
            "GetAndTouch",
            false,
            opts.key,
            opts.scope_name,
            opts.collection_name,
            opts.retry_strategy,
            async |_endpoint, vb_id, collection_id, client| {
                client
                    .get_and_touch(GetAndTouchRequest {
                        collection_id,
                        key: opts.key,
                        vbucket_id: vb_id,
                        expiry: opts.expiry,
                        on_behalf_of: None,
                    })
                    .map_ok(|resp| GetAndTouchResult {
                        value: resp.value,
                        flags: resp.flags,
                        datatype: resp.datatype,
                        cas: resp.cas,
                    })
                    .map_err(Error::new_contextual_memdx_error)
                    .await
            },
        )
        .await
    }

    pub(crate) async fn get_and_lock(
        &self,
        opts: GetAndLockOptions<'_>,
    ) -> Result<GetAndLockResult> {
        self.orchestrate(
            "GetAndLock",
            false,
            opts.key,
            opts.scope_name,
            opts.collection_name,
            opts.retry_strategy,
            async |_endpoint, vb_id, collection_id, client| {
                client
                    .get_and_lock(GetAndLockRequest {
                        collection_id,
                        key: opts.key,
                        vbucket_id: vb_id,
                        lock_time: opts.lock_time,
                        on_behalf_of: None,
                    })
                    .map_ok(|resp| GetAndLockResult {
                        value: resp.value,
                        flags: resp.flags,
                        datatype: resp.datatype,
                        cas: resp.cas,
                    })
                    .map_err(Error::new_contextual_memdx_error)
                    .await
            },
        )
        .await
    }

    pub(crate) async fn unlock(&self, opts: UnlockOptions<'_>) -> Result<UnlockResult> {
        self.orchestrate(
            "Unlock",
            false,
            opts.key,
            opts.scope_name,
            opts.collection_name,
            opts.retry_strategy,
            async |_endpoint, vb_id, collection_id, client| {
                client
                    .unlock(UnlockRequest {
                        collection_id,
                        key: opts.key,
                        vbucket_id: vb_id,
                        cas: opts.cas,
                        on_behalf_of: None,
                    })
                    .map_ok(|_resp| UnlockResult {})
                    .map_err(Error::new_contextual_memdx_error)
                    .await
            },
        )
        .await
    }

    pub(crate) async fn lookup_in(&self, opts: LookupInOptions<'_>) -> Result<LookupInResult> {
        let op_count = opts.ops.len();
        let result = self
            .orchestrate(
                "LookupIn",
                true,
                opts.key,
                opts.scope_name,
                opts.collection_name,
                opts.retry_strategy,
                async |_endpoint, vb_id, collection_id, client| {
                    client
                        .lookup_in(LookupInRequest {
                            collection_id,
                            key: opts.key,
                            vbucket_id: vb_id,
                            ops: opts.ops,
                            flags: opts.flags,
                            on_behalf_of: None,
                        })
                        .map_ok(|resp| LookupInResult {
                            cas: resp.cas,
                            value: resp.ops.into_iter().map(subdoc_result).collect(),
                            doc_is_deleted: resp.doc_is_deleted,
                        })
                        .map_err(Error::new_contextual_memdx_error)
                        .await
                },
            )
            .await?;

        debug_assert_eq!(result.value.len(), op_count);
        Ok(result)
    }

    pub(crate) async fn mutate_in(&self, opts: MutateInOptions<'_>) -> Result<MutateInResult> {
        self.orchestrate(
            "MutateIn",
            false,
            opts.key,
            opts.scope_name,
            opts.collection_name,
            opts.retry_strategy,
            async |_endpoint, vb_id, collection_id, client| {
                client
                    .mutate_in(MutateInRequest {
                        collection_id,
                        key: opts.key,
                        vbucket_id: vb_id,
                        ops: opts.ops,
                        flags: opts.flags,
                        expiry: opts.expiry,
                        preserve_expiry: opts.preserve_expiry,
                        cas: opts.cas,
                        on_behalf_of: None,
                        durability_level: opts.durability_level,
                        durability_level_timeout: None,
                    })
                    .map_ok(|resp| MutateInResult {
                        cas: resp.cas,
                        value: resp.ops.into_iter().map(subdoc_result).collect(),
                        mutation_token: mutation_token(vb_id, resp.mutation_token),
                    })
                    .map_err(Error::new_contextual_memdx_error)
                    .await
            },
        )
        .await
    }

    pub(crate) async fn get_collection_id(
        &self,
        opts: GetCollectionIdOptions<'_>,
    ) -> Result<GetCollectionIdResult> {
        let retry_info = RetryInfo::new("GetCollectionID", true, opts.retry_strategy);
        let collections = self.collections.clone();
        let scope_name = opts.scope_name.to_string();
        let collection_name = opts.collection_name.to_string();

        orchestrate_retries(self.retry_manager.clone(), retry_info, async || {
            let (collection_id, manifest_rev) = collections
                .resolve_collection_id(&scope_name, &collection_name)
                .await?;

            Ok(GetCollectionIdResult {
                manifest_rev,
                collection_id,
            })
        })
        .await
    }
}
