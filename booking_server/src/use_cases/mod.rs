pub mod dispatch;
pub mod showcase;
pub mod toggle;
pub mod validate;

#[cfg(test)]
pub(crate) mod test_support;
