pub mod remove_virtual_switch;
