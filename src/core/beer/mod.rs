//! The beer stock.

pub mod beer_dto;
pub mod beer_entity;
pub mod beer_error;
pub mod beer_mapper;
pub mod beer_repository;
pub mod beer_service;
