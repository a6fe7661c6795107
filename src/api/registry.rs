//! In-memory environment inventory.
//!
//! Environments group instances; each instance carries a power state. The
//! registry is the handlers' backing store: reads for enumeration, writes
//! for refresh and power toggles. The inventory source is pluggable so tests
//! and deployments can seed their own.

use std::sync::RwLock;

use serde::Serialize;

/// Power state of a single instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PowerState {
    Running,
    Stopped,
}

impl PowerState {
    /// Map a power action path parameter onto the resulting state.
    pub fn from_action(action: &str) -> Option<Self> {
        match action {
            "start" => Some(PowerState::Running),
            "stop" => Some(PowerState::Stopped),
            _ => None,
        }
    }
}

/// A single controllable instance.
#[derive(Debug, Clone, Serialize)]
pub struct Instance {
    pub id: String,
    pub name: String,
    pub power: PowerState,
}

/// An environment: a named group of instances.
#[derive(Debug, Clone, Serialize)]
pub struct Environment {
    pub id: String,
    pub name: String,
    pub instances: Vec<Instance>,
}

/// Producer of the current inventory, called at startup and on refresh.
pub type InventorySource = Box<dyn Fn() -> Vec<Environment> + Send + Sync>;

/// Thread-safe registry of environments.
pub struct EnvironmentRegistry {
    source: InventorySource,
    envs: RwLock<Vec<Environment>>,
}

impl EnvironmentRegistry {
    /// Seed the registry from the given source.
    pub fn new(source: InventorySource) -> Self {
        let envs = RwLock::new(source());
        Self { source, envs }
    }

    /// Re-pull the inventory from the source, replacing the current view.
    /// Returns the number of environments after the refresh.
    pub fn refresh(&self) -> usize {
        let fresh = (self.source)();
        let count = fresh.len();
        *self.write() = fresh;
        count
    }

    /// Snapshot of every environment.
    pub fn all(&self) -> Vec<Environment> {
        self.read().clone()
    }

    /// Snapshot of one environment by id.
    pub fn get(&self, env_id: &str) -> Option<Environment> {
        self.read().iter().find(|e| e.id == env_id).cloned()
    }

    /// Set every instance in an environment to the target state.
    /// Returns the number of instances affected, or `None` for an unknown id.
    pub fn set_env_power(&self, env_id: &str, power: PowerState) -> Option<usize> {
        let mut envs = self.write();
        let env = envs.iter_mut().find(|e| e.id == env_id)?;
        for instance in &mut env.instances {
            instance.power = power;
        }
        Some(env.instances.len())
    }

    /// Set a single instance to the target state, wherever it lives.
    /// Returns the updated instance, or `None` for an unknown id.
    pub fn set_instance_power(&self, instance_id: &str, power: PowerState) -> Option<Instance> {
        let mut envs = self.write();
        for env in envs.iter_mut() {
            if let Some(instance) = env.instances.iter_mut().find(|i| i.id == instance_id) {
                instance.power = power;
                return Some(instance.clone());
            }
        }
        None
    }

    fn read(&self) -> std::sync::RwLockReadGuard<'_, Vec<Environment>> {
        self.envs.read().unwrap_or_else(|e| e.into_inner())
    }

    fn write(&self) -> std::sync::RwLockWriteGuard<'_, Vec<Environment>> {
        self.envs.write().unwrap_or_else(|e| e.into_inner())
    }
}

/// Built-in inventory used when no external source is wired up.
pub fn default_inventory() -> Vec<Environment> {
    vec![
        Environment {
            id: "alpha".to_string(),
            name: "Alpha".to_string(),
            instances: vec![
                Instance {
                    id: "alpha-1".to_string(),
                    name: "alpha web".to_string(),
                    power: PowerState::Running,
                },
                Instance {
                    id: "alpha-2".to_string(),
                    name: "alpha worker".to_string(),
                    power: PowerState::Stopped,
                },
            ],
        },
        Environment {
            id: "bravo".to_string(),
            name: "Bravo".to_string(),
            instances: vec![Instance {
                id: "bravo-1".to_string(),
                name: "bravo web".to_string(),
                power: PowerState::Running,
            }],
        },
    ]
}
