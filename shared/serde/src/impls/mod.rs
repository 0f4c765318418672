mod option;
mod scalars;
mod string;
mod vector;
