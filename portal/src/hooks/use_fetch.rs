use std::{future::Future, rc::Rc};

use yew::{platform::spawn_local, prelude::*};

use crate::api::{use_api, ApiClient, ApiError, RequestScope};

#[derive(Debug, Clone, PartialEq)]
pub enum FetchState<T> {
    Loading,
    Ready(Rc<T>),
    Failed(ApiError),
}

impl<T> FetchState<T> {
    pub fn data(&self) -> Option<&T> {
        match self {
            FetchState::Ready(data) => Some(data),
            _ => None,
        }
    }
}

pub struct UseFetchHandle<T> {
    state: UseStateHandle<FetchState<T>>,
    generation: UseStateHandle<u32>,
}

impl<T> Clone for UseFetchHandle<T> {
    fn clone(&self) -> Self {
        UseFetchHandle {
            state: self.state.clone(),
            generation: self.generation.clone(),
        }
    }
}

impl<T> UseFetchHandle<T> {
    pub fn state(&self) -> &FetchState<T> {
        &self.state
    }

    /// Runs the fetch again, keeping the current data on screen until the
    /// new answer arrives.
    pub fn reload(&self) {
        self.generation.set(self.generation.wrapping_add(1));
    }
}

/// Fetches on mount and again whenever `deps` change. The request runs under
/// a [`RequestScope`] owned by the effect, so leaving the page aborts it and
/// the aborted result is dropped.
#[hook]
pub fn use_fetch<T, D, F, Fut>(deps: D, fetch: F) -> UseFetchHandle<T>
where
    T: 'static,
    D: PartialEq + Clone + 'static,
    F: FnOnce(ApiClient, D) -> Fut + 'static,
    Fut: Future<Output = Result<T, ApiError>> + 'static,
{
    let api = use_api();
    let state = use_state(|| FetchState::Loading);
    let generation = use_state(|| 0_u32);
    {
        let state = state.clone();
        use_effect_with((deps, *generation), move |(deps, generation)| {
            let scope = RequestScope::new();
            let api = api.scoped(&scope);
            let deps = deps.clone();
            if *generation == 0 {
                state.set(FetchState::Loading);
            }
            spawn_local(async move {
                match fetch(api, deps).await {
                    Ok(data) => state.set(FetchState::Ready(Rc::new(data))),
                    Err(ApiError::Aborted) => {}
                    Err(error) => {
                        log::warn!("Fail to load page data, error={error}");
                        state.set(FetchState::Failed(error));
                    }
                }
            });
            move || drop(scope)
        });
    }
    UseFetchHandle { state, generation }
}
