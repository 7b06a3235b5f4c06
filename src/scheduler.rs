//! Background path computation with per-agent hand-off slots.
//!
//! Each accepted request spawns one worker thread that runs the search
//! against the shared immutable graph and publishes the result into a
//! guarded slot (mutex around the path, atomic ready flag). The tick
//! thread polls the flag once per tick and drains the slot under the same
//! guard. Workers never write agent state; agents never see a path that
//! was not handed off through a slot.
//!
//! Invariants:
//!
//! - at most one in-flight search per agent: new requests for a busy agent
//!   are either rejected ([`PathScheduler::try_request`]) or the previous
//!   worker is joined and its result discarded before the replacement
//!   starts ([`PathScheduler::request_superseding`])
//! - the slot lock is held only for the store/take, never across a search
//! - there is no mid-search cancellation; superseded work runs to
//!   completion and is drained on join

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::thread::{self, JoinHandle};

use log::{debug, warn};

use crate::graph::{NavGraph, NodeId};
use crate::search::{astar, PathResult};

/// Identity of a path requester.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct AgentId(pub u32);

/// Request lifecycle per agent: `Idle -> Computing -> ResultReady -> Idle`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RequestState {
    /// No search pending for this agent.
    Idle,
    /// A worker is running (or finished but not yet flagged).
    Computing,
    /// A result is published and waiting to be drained.
    ResultReady,
}

/// Guarded hand-off slot shared between one worker and the tick thread.
#[derive(Default)]
struct ResultSlot {
    ready: AtomicBool,
    result: Mutex<Option<PathResult>>,
}

struct InFlight {
    goal: NodeId,
    adopt_as_current: bool,
    slot: Arc<ResultSlot>,
    worker: Option<JoinHandle<()>>,
}

/// A drained search result, ready to hand to the owning agent.
#[derive(Clone, Debug)]
pub struct CompletedSearch {
    /// The search result (may be incomplete; the agent decides).
    pub result: PathResult,
    /// Goal node of the request.
    pub goal: NodeId,
    /// Whether the goal should become the agent's node on arrival.
    pub adopt_as_current: bool,
}

/// Coordinates background searches, one worker per in-flight request.
pub struct PathScheduler {
    graph: Arc<NavGraph>,
    in_flight: HashMap<AgentId, InFlight>,
}

impl PathScheduler {
    /// Create a scheduler over a shared immutable graph.
    pub fn new(graph: Arc<NavGraph>) -> Self {
        Self {
            graph,
            in_flight: HashMap::new(),
        }
    }

    /// Current request state for an agent.
    pub fn state(&self, agent: AgentId) -> RequestState {
        match self.in_flight.get(&agent) {
            None => RequestState::Idle,
            Some(pending) if pending.slot.ready.load(Ordering::Acquire) => {
                RequestState::ResultReady
            }
            Some(_) => RequestState::Computing,
        }
    }

    /// Request a search unless one is already pending for this agent.
    ///
    /// Returns false (with a diagnostic) when rejected; the pending
    /// request is untouched.
    pub fn try_request(
        &mut self,
        agent: AgentId,
        start: NodeId,
        goal: NodeId,
        adopt_as_current: bool,
    ) -> bool {
        if self.in_flight.contains_key(&agent) {
            debug!(
                "request for agent {} ignored: a search is already pending",
                agent.0
            );
            return false;
        }
        self.spawn_search(agent, start, goal, adopt_as_current);
        true
    }

    /// Replace any pending request for this agent with a new one.
    ///
    /// The previous worker is joined first and its result discarded, so at
    /// most one worker per agent is ever alive and the slot never has two
    /// writers.
    pub fn request_superseding(
        &mut self,
        agent: AgentId,
        start: NodeId,
        goal: NodeId,
        adopt_as_current: bool,
    ) {
        if let Some(previous) = self.in_flight.remove(&agent) {
            debug!("superseding pending search for agent {}", agent.0);
            Self::join_worker(agent, previous);
        }
        self.spawn_search(agent, start, goal, adopt_as_current);
    }

    fn spawn_search(&mut self, agent: AgentId, start: NodeId, goal: NodeId, adopt: bool) {
        let slot = Arc::new(ResultSlot::default());
        let worker_slot = Arc::clone(&slot);
        let graph = Arc::clone(&self.graph);

        let worker = thread::Builder::new()
            .name(format!("pathfind-{}", agent.0))
            .spawn(move || {
                let result = astar(&graph, start, goal);
                // Lock only for the hand-off, never during the search
                match worker_slot.result.lock() {
                    Ok(mut guard) => *guard = Some(result),
                    Err(poisoned) => *poisoned.into_inner() = Some(result),
                }
                worker_slot.ready.store(true, Ordering::Release);
            })
            .expect("failed to spawn pathfinding thread");

        self.in_flight.insert(
            agent,
            InFlight {
                goal,
                adopt_as_current: adopt,
                slot,
                worker: Some(worker),
            },
        );
    }

    /// Drain a published result for an agent, if one is ready.
    ///
    /// Takes the result under the slot guard, clears the ready flag, joins
    /// the worker and returns the agent to `Idle`. Called once per tick
    /// per agent of interest.
    pub fn poll(&mut self, agent: AgentId) -> Option<CompletedSearch> {
        let ready = self
            .in_flight
            .get(&agent)?
            .slot
            .ready
            .load(Ordering::Acquire);
        if !ready {
            return None;
        }

        let pending = self.in_flight.remove(&agent)?;
        let result = match pending.slot.result.lock() {
            Ok(mut guard) => guard.take(),
            Err(poisoned) => poisoned.into_inner().take(),
        };
        pending.slot.ready.store(false, Ordering::Release);

        let goal = pending.goal;
        let adopt_as_current = pending.adopt_as_current;
        Self::join_worker(agent, pending);

        match result {
            Some(result) => Some(CompletedSearch {
                result,
                goal,
                adopt_as_current,
            }),
            None => {
                warn!("ready flag set but result slot empty for agent {}", agent.0);
                None
            }
        }
    }

    /// Number of agents with a pending request.
    pub fn pending_count(&self) -> usize {
        self.in_flight.len()
    }

    /// Join every outstanding worker, discarding undrained results.
    pub fn shutdown(&mut self) {
        for (agent, pending) in self.in_flight.drain() {
            Self::join_worker(agent, pending);
        }
    }

    fn join_worker(agent: AgentId, mut pending: InFlight) {
        if let Some(worker) = pending.worker.take() {
            if worker.join().is_err() {
                warn!("pathfinding worker for agent {} panicked", agent.0);
            }
        }
    }
}
