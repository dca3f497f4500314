/// Build a [`Node::Branch`](crate::domain::Node) from `key => value` pairs.
///
/// Values are anything convertible into a `Node`, including nested
/// `branch!` invocations.
///
/// ```
/// use treeconf::branch;
///
/// let equipment = branch! {
///     "enabled" => true,
///     "type" => "rorc",
///     "serial" => 33333,
/// };
/// assert_eq!(equipment.get::<i64>("serial").unwrap(), Some(33333));
/// ```
#[macro_export]
macro_rules! branch {
    () => {
        $crate::domain::Node::Branch($crate::domain::Branch::new())
    };
    ($($key:expr => $value:expr),+ $(,)?) => {{
        let mut branch = $crate::domain::Branch::new();
        $(
            branch.insert($key, $value);
        )+
        $crate::domain::Node::Branch(branch)
    }};
}
