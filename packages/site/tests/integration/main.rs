mod dictionary_tests;
mod form_tests;
mod support;
