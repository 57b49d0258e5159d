pub mod city;
pub mod form;
pub mod voucher;
