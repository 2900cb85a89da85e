use crate::error::ContainerError;
use dashmap::DashMap;
use std::any::{Any, TypeId};
use std::sync::Arc;

type Result<T> = std::result::Result<T, ContainerError>;

/// Casts a registered instance to an `Arc<dyn Trait>` boxed as `Any`.
/// Returns `None` when the instance is not of the bound implementation type.
type CasterFn =
    Arc<dyn Fn(Arc<dyn Any + Send + Sync>) -> Option<Arc<dyn Any + Send + Sync>> + Send + Sync>;

/// Thread-safe dependency injection container.
#[derive(Clone, Default)]
pub struct Container {
    services: DashMap<TypeId, ServiceEntry>,
    trait_mappings: DashMap<TypeId, TypeId>,
    casters: DashMap<TypeId, CasterFn>,
}

#[derive(Clone)]
struct ServiceEntry {
    instance: Arc<dyn Any + Send + Sync>,
}

impl Container {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register<T: 'static + Send + Sync>(&mut self, instance: T) -> &mut Self {
        self.register_arc(Arc::new(instance))
    }

    /// Register an instance that is already shared elsewhere.
    pub fn register_arc<T: 'static + Send + Sync>(&mut self, instance: Arc<T>) -> &mut Self {
        let entry = ServiceEntry { instance };
        self.services.insert(TypeId::of::<T>(), entry);
        self
    }

    pub fn register_trait<Trait, Impl, F>(&mut self, caster_fn: F) -> &mut Self
    where
        Trait: ?Sized + 'static + Send + Sync,
        Impl: 'static + Send + Sync,
        F: Fn(Arc<Impl>) -> Arc<Trait> + 'static + Send + Sync,
    {
        let trait_id = TypeId::of::<Trait>();
        let impl_id = TypeId::of::<Impl>();

        self.trait_mappings.insert(trait_id, impl_id);

        let caster: CasterFn = Arc::new(move |instance: Arc<dyn Any + Send + Sync>| {
            let concrete = instance.downcast::<Impl>().ok()?;
            let trait_obj: Arc<Trait> = caster_fn(concrete);
            // Arc<dyn Trait> is unsized, so it travels inside another Arc.
            Some(Arc::new(trait_obj) as Arc<dyn Any + Send + Sync>)
        });

        self.casters.insert(trait_id, caster);
        self
    }

    pub fn resolve<T: 'static + Send + Sync>(&self) -> Result<Arc<T>> {
        let entry = self
            .services
            .get(&TypeId::of::<T>())
            .ok_or_else(|| ContainerError::DependencyNotFound {
                type_name: std::any::type_name::<T>().to_string(),
            })?;
        entry
            .instance
            .clone()
            .downcast::<T>()
            .map_err(|_| ContainerError::DowncastFailed {
                type_name: std::any::type_name::<T>().to_string(),
            })
    }

    pub fn resolve_trait<T: ?Sized + 'static + Send + Sync>(&self) -> Result<Arc<T>> {
        let requested_type_id = TypeId::of::<T>();

        let caster = self.casters.get(&requested_type_id).ok_or_else(|| {
            ContainerError::DependencyNotFound {
                type_name: std::any::type_name::<T>().to_string(),
            }
        })?;

        let impl_type_id = self.trait_mappings.get(&requested_type_id).ok_or_else(|| {
            ContainerError::DependencyNotFound {
                type_name: format!(
                    "No implementation mapping found for trait '{}'",
                    std::any::type_name::<T>()
                ),
            }
        })?;

        let entry = self.services.get(impl_type_id.value()).ok_or_else(|| {
            ContainerError::DependencyNotFound {
                type_name: format!(
                    "Implementation for trait '{}' not registered",
                    std::any::type_name::<T>()
                ),
            }
        })?;

        let downcast_failed = || ContainerError::DowncastFailed {
            type_name: std::any::type_name::<T>().to_string(),
        };
        let wrapper = (caster.value())(entry.instance.clone())
            .ok_or_else(downcast_failed)?
            .downcast::<Arc<T>>()
            .map_err(|_| downcast_failed())?;
        Ok(wrapper.as_ref().clone())
    }

    pub fn contains<T: ?Sized + 'static>(&self) -> bool {
        let type_id = TypeId::of::<T>();
        self.services.contains_key(&type_id) || self.trait_mappings.contains_key(&type_id)
    }

    pub fn len(&self) -> usize {
        self.services.len()
    }

    pub fn is_empty(&self) -> bool {
        self.services.is_empty()
    }
}
