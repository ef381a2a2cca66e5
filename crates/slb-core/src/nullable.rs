use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// A property of a fetched object: missing from the payload, explicitly
/// `null`, or set.
///
/// Snapshots are submitted back whole, so a `null` that came in has to go
/// back out as `null` and a missing key has to stay missing. Fields use
/// `#[serde(default, skip_serializing_if = "Nullable::is_absent")]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Nullable<T> {
    Absent,
    Null,
    Value(T),
}

impl<T> Default for Nullable<T> {
    fn default() -> Self {
        Nullable::Absent
    }
}

impl<T> Nullable<T> {
    pub fn is_absent(&self) -> bool {
        matches!(self, Nullable::Absent)
    }

    pub fn get(&self) -> Option<&T> {
        match self {
            Nullable::Value(value) => Some(value),
            _ => None,
        }
    }

    pub fn get_mut(&mut self) -> Option<&mut T> {
        match self {
            Nullable::Value(value) => Some(value),
            _ => None,
        }
    }

    pub fn set(&mut self, value: T) {
        *self = Nullable::Value(value);
    }

    /// Replace an absent or null property with `f()` and return the value
    pub fn get_or_insert_with(&mut self, f: impl FnOnce() -> T) -> &mut T {
        if !matches!(self, Nullable::Value(_)) {
            *self = Nullable::Value(f());
        }
        match self {
            Nullable::Value(value) => value,
            // set just above
            _ => unreachable!("nullable was just filled"),
        }
    }
}

impl<T: Copy> Nullable<T> {
    pub fn copied(&self) -> Option<T> {
        self.get().copied()
    }
}

impl<T> From<T> for Nullable<T> {
    fn from(value: T) -> Self {
        Nullable::Value(value)
    }
}

impl<T: Serialize> Serialize for Nullable<T> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            Nullable::Value(value) => value.serialize(serializer),
            // Absent is skipped by the field attribute
            Nullable::Null | Nullable::Absent => serializer.serialize_none(),
        }
    }
}

impl<'de, T: Deserialize<'de>> Deserialize<'de> for Nullable<T> {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        // A missing key never reaches here; `#[serde(default)]` yields Absent
        Ok(match Option::<T>::deserialize(deserializer)? {
            Some(value) => Nullable::Value(value),
            None => Nullable::Null,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[derive(Debug, Default, PartialEq, Deserialize, Serialize)]
    struct Listener {
        #[serde(default, skip_serializing_if = "Nullable::is_absent")]
        port: Nullable<i64>,
    }

    #[test]
    fn test_three_states_round_trip() {
        for raw in [json!({}), json!({"port": null}), json!({"port": 80})] {
            let parsed: Listener = serde_json::from_value(raw.clone()).unwrap();
            assert_eq!(serde_json::to_value(&parsed).unwrap(), raw);
        }

        let parsed: Listener = serde_json::from_value(json!({"port": null})).unwrap();
        assert_eq!(parsed.port, Nullable::Null);
        assert_eq!(parsed.port.copied(), None);
    }

    #[test]
    fn test_get_or_insert_with() {
        let mut list: Nullable<Vec<i64>> = Nullable::Null;
        list.get_or_insert_with(Vec::new).push(1);
        list.get_or_insert_with(Vec::new).push(2);
        assert_eq!(list, Nullable::Value(vec![1, 2]));
    }
}
