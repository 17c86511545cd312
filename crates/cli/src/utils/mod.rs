pub(crate) mod ancestor_search;
