pub mod tech_tree;
