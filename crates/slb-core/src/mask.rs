use crate::errors::{CoreError, Result};
use std::fmt;
use std::str::FromStr;

/// One relational property in an object mask, with its own nested expansions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MaskNode {
    pub name: String,
    pub children: Vec<MaskNode>,
}

impl MaskNode {
    pub fn leaf(name: &str) -> Self {
        Self {
            name: name.to_string(),
            children: Vec::new(),
        }
    }

    pub fn with_children(name: &str, children: Vec<MaskNode>) -> Self {
        Self {
            name: name.to_string(),
            children,
        }
    }

    fn write(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)?;
        if !self.children.is_empty() {
            write_list(f, &self.children)?;
        }
        Ok(())
    }
}

fn write_list(f: &mut fmt::Formatter<'_>, nodes: &[MaskNode]) -> fmt::Result {
    f.write_str("[")?;
    for (i, node) in nodes.iter().enumerate() {
        if i > 0 {
            f.write_str(",")?;
        }
        node.write(f)?;
    }
    f.write_str("]")
}

/// Object mask describing which nested relations a fetch should return.
///
/// Displays in the bracketed form `mask[parent[child,other]]` and parses
/// the same grammar back (with or without the leading `mask`).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ObjectMask {
    nodes: Vec<MaskNode>,
}

impl ObjectMask {
    pub fn new(nodes: Vec<MaskNode>) -> Self {
        Self { nodes }
    }

    pub fn nodes(&self) -> &[MaskNode] {
        &self.nodes
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Mask used by the account-wide load balancer listing.
    pub fn local_lbs() -> Self {
        Self::new(vec![
            MaskNode::with_children("loadBalancerHardware", vec![MaskNode::leaf("datacenter")]),
            MaskNode::leaf("ipAddress"),
        ])
    }

    /// Full expansion used when fetching a single load balancer.
    pub fn local_lb_detail() -> Self {
        let services = MaskNode::with_children(
            "services",
            vec![
                MaskNode::with_children("healthChecks", vec![MaskNode::leaf("type")]),
                MaskNode::leaf("groupReferences"),
                MaskNode::leaf("ipAddress"),
            ],
        );
        let service_groups = MaskNode::with_children(
            "serviceGroups",
            vec![
                MaskNode::leaf("routingMethod"),
                MaskNode::leaf("routingType"),
                services,
            ],
        );

        Self::new(vec![
            MaskNode::with_children("loadBalancerHardware", vec![MaskNode::leaf("datacenter")]),
            MaskNode::leaf("ipAddress"),
            MaskNode::with_children("virtualServers", vec![service_groups]),
        ])
    }

    /// Expansion of the virtual server tree needed to edit it in place.
    pub fn virtual_server_tree() -> Self {
        Self::new(vec![MaskNode::with_children(
            "virtualServers",
            vec![MaskNode::with_children(
                "serviceGroups",
                vec![MaskNode::with_children(
                    "services",
                    vec![MaskNode::leaf("groupReferences")],
                )],
            )],
        )])
    }

    /// Expansion applied to `getVirtualServers` when editing a single service.
    pub fn service_detail() -> Self {
        Self::new(vec![MaskNode::with_children(
            "serviceGroups",
            vec![MaskNode::with_children(
                "services",
                vec![
                    MaskNode::leaf("groupReferences"),
                    MaskNode::leaf("healthChecks"),
                ],
            )],
        )])
    }

    pub fn service_groups() -> Self {
        Self::new(vec![MaskNode::leaf("serviceGroups")])
    }
}

impl fmt::Display for ObjectMask {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("mask")?;
        write_list(f, &self.nodes)
    }
}

impl FromStr for ObjectMask {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self> {
        let compact: String = s.chars().filter(|c| !c.is_whitespace()).collect();

        let body = match compact.strip_prefix("mask") {
            Some(rest) => rest
                .strip_prefix('[')
                .and_then(|inner| inner.strip_suffix(']'))
                .ok_or_else(|| CoreError::InvalidMask(s.to_string()))?,
            None => compact.as_str(),
        };

        let mut parser = Parser {
            input: body.as_bytes(),
            pos: 0,
        };
        let nodes = parser.list()?;
        if parser.pos != parser.input.len() {
            return Err(CoreError::InvalidMask(format!(
                "unexpected '{}' at offset {} in {}",
                parser.input[parser.pos] as char, parser.pos, s
            )));
        }

        Ok(Self::new(nodes))
    }
}

struct Parser<'a> {
    input: &'a [u8],
    pos: usize,
}

impl Parser<'_> {
    fn peek(&self) -> Option<u8> {
        self.input.get(self.pos).copied()
    }

    fn list(&mut self) -> Result<Vec<MaskNode>> {
        let mut nodes = vec![self.node()?];
        while self.peek() == Some(b',') {
            self.pos += 1;
            nodes.push(self.node()?);
        }
        Ok(nodes)
    }

    fn node(&mut self) -> Result<MaskNode> {
        let start = self.pos;
        while let Some(c) = self.peek() {
            if c.is_ascii_alphanumeric() || c == b'_' || c == b'.' {
                self.pos += 1;
            } else {
                break;
            }
        }
        if start == self.pos {
            return Err(CoreError::InvalidMask(format!(
                "expected property name at offset {}",
                start
            )));
        }
        // ASCII-only by construction
        let name = String::from_utf8_lossy(&self.input[start..self.pos]).into_owned();

        let children = if self.peek() == Some(b'[') {
            self.pos += 1;
            let children = self.list()?;
            if self.peek() != Some(b']') {
                return Err(CoreError::InvalidMask(format!(
                    "unclosed '[' after {}",
                    name
                )));
            }
            self.pos += 1;
            children
        } else {
            Vec::new()
        };

        Ok(MaskNode { name, children })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_masks_render() {
        assert_eq!(
            ObjectMask::local_lbs().to_string(),
            "mask[loadBalancerHardware[datacenter],ipAddress]"
        );
        assert_eq!(
            ObjectMask::local_lb_detail().to_string(),
            "mask[loadBalancerHardware[datacenter],ipAddress,virtualServers[serviceGroups\
             [routingMethod,routingType,services[healthChecks[type],groupReferences,ipAddress]]]]"
        );
        assert_eq!(
            ObjectMask::virtual_server_tree().to_string(),
            "mask[virtualServers[serviceGroups[services[groupReferences]]]]"
        );
        assert_eq!(
            ObjectMask::service_detail().to_string(),
            "mask[serviceGroups[services[groupReferences,healthChecks]]]"
        );
        assert_eq!(ObjectMask::service_groups().to_string(), "mask[serviceGroups]");
    }

    #[test]
    fn test_parse_matches_builder() {
        let parsed: ObjectMask = "mask[loadBalancerHardware[datacenter], ipAddress, \
                                  virtualServers[serviceGroups[routingMethod,routingType,services\
                                  [healthChecks[type], groupReferences, ipAddress]]]]"
            .parse()
            .unwrap();
        assert_eq!(parsed, ObjectMask::local_lb_detail());
    }

    #[test]
    fn test_parse_without_prefix() {
        let parsed: ObjectMask = "id,virtualServers[port]".parse().unwrap();
        assert_eq!(parsed.to_string(), "mask[id,virtualServers[port]]");
    }

    #[test]
    fn test_parse_errors() {
        assert!("mask[".parse::<ObjectMask>().is_err());
        assert!("mask[a[b]".parse::<ObjectMask>().is_err());
        assert!("a,,b".parse::<ObjectMask>().is_err());
        assert!("a]".parse::<ObjectMask>().is_err());
        assert!("".parse::<ObjectMask>().is_err());
    }
}
