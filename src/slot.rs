// Tracks whether a server-side resource is not acquired yet, held, or
// already released. Only a held handle is ever handed out for release.

#[derive(Debug, Default)]
pub enum Slot<T> {
    #[default]
    Vacant,
    Held(T),
    Released,
}

impl<T> Slot<T> {
    pub fn acquire(&mut self, value: T) {
        *self = Slot::Held(value);
    }

    pub fn get_mut(&mut self) -> Option<&mut T> {
        match self {
            Slot::Held(value) => Some(value),
            _ => None,
        }
    }

    pub fn is_held(&self) -> bool {
        matches!(self, Slot::Held(_))
    }

    // Hand out the held value and mark the slot released.
    // Returns `None` when there is nothing to release.
    pub fn release(&mut self) -> Option<T> {
        match std::mem::replace(self, Slot::Released) {
            Slot::Held(value) => Some(value),
            Slot::Vacant => {
                *self = Slot::Vacant;
                None
            }
            Slot::Released => None,
        }
    }
}
