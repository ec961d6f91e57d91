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

use std::collections::HashMap;
use std::sync::{Arc, Weak};

use log::debug;
use tokio::sync::Mutex;

use crate::agent::Agent;
use crate::error::Result;
use crate::options::agent::AgentOptions;
use crate::options::ondemand_agentmanager::OnDemandAgentManagerOptions;

/// Lazily opens bucket-scoped [Agent]s from a shared cluster configuration, so that
/// an application addressing many buckets from one cluster reference does not need
/// to eagerly connect to all of them up front.
pub struct OnDemandAgentManager {
    base_opts: AgentOptions,
    cluster_agent: Arc<Agent>,
    bucket_agents: Mutex<HashMap<String, Arc<Agent>>>,
}

impl OnDemandAgentManager {
    pub async fn new(opts: OnDemandAgentManagerOptions) -> Result<Self> {
        let base_opts: AgentOptions = opts.into();

        let mut cluster_opts = base_opts.clone();
        cluster_opts.bucket_name = None;
        let cluster_agent = Arc::new(Agent::new(cluster_opts).await?);

        Ok(Self {
            base_opts,
            cluster_agent,
            bucket_agents: Mutex::new(HashMap::new()),
        })
    }

    /// Returns a weak reference to the agent connected without a selected bucket.
    pub fn get_cluster_agent(&self) -> Weak<Agent> {
        Arc::downgrade(&self.cluster_agent)
    }

    /// Returns a weak reference to the agent for the named bucket, opening it on
    /// first access and caching it for subsequent calls.
    pub async fn get_bucket_agent(&self, bucket_name: impl Into<String>) -> Result<Weak<Agent>> {
        let bucket_name = bucket_name.into();

        let mut agents = self.bucket_agents.lock().await;
        if let Some(agent) = agents.get(&bucket_name) {
            return Ok(Arc::downgrade(agent));
        }

        debug!("Opening on-demand agent for bucket {bucket_name}");

        let mut bucket_opts = self.base_opts.clone();
        bucket_opts.bucket_name = Some(bucket_name.clone());

        let agent = Arc::new(Agent::new(bucket_opts).await?);
        let weak = Arc::downgrade(&agent);
        agents.insert(bucket_name, agent);

        Ok(weak)
    }

    pub async fn close(&self) {
        self.cluster_agent.close().await;

        let mut agents = self.bucket_agents.lock().await;
        for (_, agent) in agents.drain() {
            agent.close().await;
        }
    }
}
