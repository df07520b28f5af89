use std::fmt;

use crate::error::{SerializerError, SerializerResult};

use super::mapper::{ListToRecordsMapper, Mapper};

/// Identity of a node inside a [`LinkedList`].
///
/// Two nodes carrying the same data are still distinct: identity is the slot
/// the node occupies in its list, never its payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A node of a doubly-linked list with an extra `random` pointer.
///
/// `previous`, `next` and `random` are plain ids resolved against the owning
/// list, so back- and cross-references never own anything.
#[derive(Debug, Clone, Default)]
pub struct ListNode {
    data: Option<String>,
    previous: Option<NodeId>,
    next: Option<NodeId>,
    random: Option<NodeId>,
}

impl ListNode {
    fn new(data: Option<String>) -> Self {
        Self {
            data,
            ..Default::default()
        }
    }

    pub fn data(&self) -> Option<&str> {
        self.data.as_deref()
    }

    pub fn previous(&self) -> Option<NodeId> {
        self.previous
    }

    pub fn next(&self) -> Option<NodeId> {
        self.next
    }

    pub fn random(&self) -> Option<NodeId> {
        self.random
    }
}

/// A doubly-linked list whose nodes may additionally point to any node of the
/// same list (or to themselves) through `random`.
///
/// Nodes live in an arena owned by the list. The forward chain starts at
/// [`head`](LinkedList::head) and the arena order is not the traversal order
/// once [`insert_after`](LinkedList::insert_after) or
/// [`push_front`](LinkedList::push_front) have been used.
///
/// # Examples
///
/// ```
/// use list_serializer::core::list::LinkedList;
///
/// let mut list = LinkedList::new();
/// let a = list.push_back(Some("A".to_string()));
/// let _b = list.push_back(None);
/// let c = list.push_back(Some("C".to_string()));
///
/// list.set_random(a, Some(c)).unwrap();
/// list.set_random(c, Some(c)).unwrap();
///
/// assert_eq!(list.len(), 3);
/// assert_eq!(list.node(a).unwrap().random(), Some(c));
/// ```
#[derive(Debug, Default)]
pub struct LinkedList {
    nodes: Vec<ListNode>,
    head: Option<NodeId>,
    tail: Option<NodeId>,
}

impl LinkedList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a list holding `data` in order, without any random link.
    pub fn from_data<I>(data: I) -> Self
    where
        I: IntoIterator<Item = Option<String>>,
    {
        let mut list = Self::new();
        for value in data {
            list.push_back(value);
        }
        list
    }

    /// Creates an empty list able to hold `capacity` nodes without
    /// reallocating.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            nodes: Vec::with_capacity(capacity),
            head: None,
            tail: None,
        }
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn head(&self) -> Option<NodeId> {
        self.head
    }

    pub fn tail(&self) -> Option<NodeId> {
        self.tail
    }

    /// Returns the node identified by `id`, if it belongs to this list.
    pub fn node(&self, id: NodeId) -> Option<&ListNode> {
        self.nodes.get(id.0)
    }

    fn checked(&self, id: NodeId) -> SerializerResult<NodeId> {
        if id.0 < self.nodes.len() {
            Ok(id)
        } else {
            Err(SerializerError::Argument(format!(
                "node {} does not belong to a list of {} nodes",
                id,
                self.nodes.len()
            )))
        }
    }

    fn allocate(&mut self, data: Option<String>) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(ListNode::new(data));
        id
    }

    /// Appends a node at the tail and returns its id.
    pub fn push_back(&mut self, data: Option<String>) -> NodeId {
        let id = self.allocate(data);
        match self.tail {
            Some(tail) => {
                self.nodes[tail.0].next = Some(id);
                self.nodes[id.0].previous = Some(tail);
            }
            None => self.head = Some(id),
        }
        self.tail = Some(id);
        id
    }

    /// Prepends a node before the current head and returns its id.
    pub fn push_front(&mut self, data: Option<String>) -> NodeId {
        let id = self.allocate(data);
        match self.head {
            Some(head) => {
                self.nodes[head.0].previous = Some(id);
                self.nodes[id.0].next = Some(head);
            }
            None => self.tail = Some(id),
        }
        self.head = Some(id);
        id
    }

    /// Inserts a node right after `at` and returns its id.
    pub fn insert_after(&mut self, at: NodeId, data: Option<String>) -> SerializerResult<NodeId> {
        let at = self.checked(at)?;
        let following = self.nodes[at.0].next;

        let id = self.allocate(data);
        self.nodes[id.0].previous = Some(at);
        self.nodes[id.0].next = following;
        self.nodes[at.0].next = Some(id);

        match following {
            Some(following) => self.nodes[following.0].previous = Some(id),
            None => self.tail = Some(id),
        }
        Ok(id)
    }

    /// Points `node.random` at `target`, or clears it when `target` is `None`.
    pub fn set_random(&mut self, node: NodeId, target: Option<NodeId>) -> SerializerResult<()> {
        let node = self.checked(node)?;
        let target = target.map(|target| self.checked(target)).transpose()?;
        self.nodes[node.0].random = target;
        Ok(())
    }

    pub fn clear_random(&mut self, node: NodeId) -> SerializerResult<()> {
        self.set_random(node, None)
    }

    pub fn set_data(&mut self, node: NodeId, data: Option<String>) -> SerializerResult<()> {
        let node = self.checked(node)?;
        self.nodes[node.0].data = data;
        Ok(())
    }

    /// Iterates over the nodes from head to tail.
    pub fn iter(&self) -> Iter<'_> {
        Iter {
            list: self,
            current: self.head,
        }
    }

    /// Position of `id` counted from the head, if it belongs to this list.
    pub fn position_of(&self, id: NodeId) -> Option<usize> {
        self.iter().position(|(current, _)| current == id)
    }

    /// Compares two lists node by node in traversal order: equal data, and
    /// the same presence or absence of `previous`, `next` and `random`.
    ///
    /// Random targets are not compared, only whether a random link exists.
    pub fn structurally_eq(&self, other: &LinkedList) -> bool {
        if self.len() != other.len() {
            return false;
        }

        self.iter().zip(other.iter()).all(|((_, x), (_, y))| {
            x.data == y.data
                && x.previous.is_some() == y.previous.is_some()
                && x.next.is_some() == y.next.is_some()
                && x.random.is_some() == y.random.is_some()
        })
    }
}

/// Strict equality: same data in the same order and random links targeting
/// the same positions.
impl PartialEq for LinkedList {
    fn eq(&self, other: &Self) -> bool {
        let mapper = ListToRecordsMapper;
        match (mapper.map(self), mapper.map(other)) {
            (Ok(left), Ok(right)) => left == right,
            _ => false,
        }
    }
}

/// Iterator over `(NodeId, &ListNode)` in head-to-tail order.
pub struct Iter<'a> {
    list: &'a LinkedList,
    current: Option<NodeId>,
}

impl<'a> Iterator for Iter<'a> {
    type Item = (NodeId, &'a ListNode);

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.current?;
        let node = self.list.node(id)?;
        self.current = node.next;
        Some((id, node))
    }
}

impl<'a> IntoIterator for &'a LinkedList {
    type Item = (NodeId, &'a ListNode);
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn data(list: &LinkedList) -> Vec<Option<&str>> {
        list.iter().map(|(_, node)| node.data()).collect()
    }

    #[test]
    fn push_back_should_link_previous_and_next() {
        let mut list = LinkedList::new();
        let a = list.push_back(Some("A".to_string()));
        let b = list.push_back(Some("B".to_string()));

        assert_eq!(list.head(), Some(a));
        assert_eq!(list.tail(), Some(b));
        assert_eq!(list.node(a).unwrap().next(), Some(b));
        assert_eq!(list.node(b).unwrap().previous(), Some(a));
        assert!(list.node(a).unwrap().previous().is_none());
        assert!(list.node(b).unwrap().next().is_none());
    }

    #[test]
    fn push_front_and_insert_after_should_keep_traversal_order() {
        let mut list = LinkedList::new();
        let b = list.push_back(Some("B".to_string()));
        list.push_front(Some("A".to_string()));
        list.insert_after(b, Some("D".to_string())).unwrap();
        list.insert_after(b, Some("C".to_string())).unwrap();

        assert_eq!(data(&list), vec![Some("A"), Some("B"), Some("C"), Some("D")]);
        let tail = list.tail().unwrap();
        assert_eq!(list.node(tail).unwrap().data(), Some("D"));

        let back: Vec<_> = std::iter::successors(list.tail(), |id| list.node(*id)?.previous())
            .map(|id| list.node(id).unwrap().data())
            .collect();
        assert_eq!(back, vec![Some("D"), Some("C"), Some("B"), Some("A")]);
    }

    #[test]
    fn set_random_should_reject_foreign_node() {
        let mut list = LinkedList::from_data([Some("A".to_string())]);
        let head = list.head().unwrap();

        let result = list.set_random(head, Some(NodeId(3)));

        assert!(matches!(result, Err(SerializerError::Argument(_))));
        assert!(list.node(head).unwrap().random().is_none());
    }

    #[test]
    fn position_of_should_follow_traversal_order() {
        let mut list = LinkedList::new();
        let c = list.push_back(Some("C".to_string()));
        let a = list.push_front(Some("A".to_string()));
        let b = list.insert_after(a, Some("B".to_string())).unwrap();

        assert_eq!(list.position_of(a), Some(0));
        assert_eq!(list.position_of(b), Some(1));
        assert_eq!(list.position_of(c), Some(2));
        assert_eq!(list.position_of(NodeId(7)), None);
    }

    #[test]
    fn random_may_point_to_itself() {
        let mut list = LinkedList::from_data([Some("A".to_string())]);
        let head = list.head().unwrap();

        list.set_random(head, Some(head)).unwrap();
        assert_eq!(list.node(head).unwrap().random(), Some(head));

        list.clear_random(head).unwrap();
        assert!(list.node(head).unwrap().random().is_none());
    }

    #[test]
    fn structural_equality_ignores_random_targets() {
        let mut left = LinkedList::from_data(["A", "B"].map(|s| Some(s.to_string())));
        let mut right = LinkedList::from_data(["A", "B"].map(|s| Some(s.to_string())));
        let (l0, r0) = (left.head().unwrap(), right.head().unwrap());
        let (l1, r1) = (left.tail().unwrap(), right.tail().unwrap());

        left.set_random(l0, Some(l0)).unwrap();
        right.set_random(r0, Some(r1)).unwrap();

        assert!(left.structurally_eq(&right));
        assert!(left != right);

        right.set_random(r0, Some(r0)).unwrap();
        assert!(left == right);

        left.set_random(l1, Some(l0)).unwrap();
        assert!(!left.structurally_eq(&right));
    }

    #[test]
    fn structural_equality_detects_length_and_data() {
        let left = LinkedList::from_data([Some("A".to_string()), None]);
        let shorter = LinkedList::from_data([Some("A".to_string())]);
        let other = LinkedList::from_data([Some("A".to_string()), Some("B".to_string())]);

        assert!(!left.structurally_eq(&shorter));
        assert!(!left.structurally_eq(&other));
        assert!(LinkedList::new().structurally_eq(&LinkedList::new()));
    }
}
