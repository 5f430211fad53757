mod dashboard;
mod evaluation;
mod resource;
mod scoring;
mod support;
mod wizards;
