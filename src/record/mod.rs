pub(crate) mod tsv;

pub(crate) use tsv::append_row;
